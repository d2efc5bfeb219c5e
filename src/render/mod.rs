/// Backend trait and frame type.
pub mod backend;
/// CPU raster backend built on `vello_cpu`.
pub mod cpu;
