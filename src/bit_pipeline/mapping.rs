//! Pixel mapping module
//!
//! This module holds the run configuration and the per-mode aggregation that
//! turns a window of bits into one pixel colour.

mod aggregator;
pub mod types;


pub use aggregator::{CellGeometry, compute_pixel};
pub use types::{MAX_CHANNELS, MappingConfig, MappingConfigBuilder, MappingMode};
