/// Immutable canvas configuration and its JSON boundary form.
pub mod canvas;
/// Per-image clip compositor.
pub mod compositor;
/// Source images, layers and scenes.
pub mod model;
