/// Fit-axis sizing and letterbox/pillarbox padding.
pub mod geometry;
