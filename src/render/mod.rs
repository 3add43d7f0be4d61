//! Renderers consuming [`Frame`](crate::draw::Frame)s.
//!
//! - [`raster`]: CPU canvas for headless snapshots
//! - [`gpu`]: wgpu window renderer

pub mod gpu;
pub mod raster;
