//! Pipeline conversions module
//!
//! This module contains the orchestration that takes raw bytes all the way to
//! a saved PNG.

mod bits_to_png;
mod timing;


pub use bits_to_png::{BitsToPngPipeline, RenderSummary};
pub use timing::{PipelineTimings, StepTiming};
