//! Rasterization module
//!
//! This module fans pixel aggregation out over a worker pool and collects the
//! results into an ordered pixel buffer.

mod progress;
mod rasterizer;
pub mod types;


pub use progress::ProgressObserver;
pub use rasterizer::Rasterizer;
pub use types::{ColorSample, RasterBuffer};
