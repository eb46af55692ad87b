//! Bit-to-pixel mapping pipeline
//!
//! This module renders arbitrary binary data as a raster image, with separate
//! modules for bit extraction, canvas planning, per-pixel aggregation,
//! parallel rasterization and PNG assembly.

pub mod bits;
pub mod layout;
pub mod mapping;
pub mod raster;
pub mod png;
pub mod conversions;
pub mod common;

pub use common::{
    MappingError,
    Result,
};

pub use bits::{
    BitSource,
    BitStream,
    ByteBitSource,
};

pub use layout::{
    Dimensions,
    plan_dimensions,
};

pub use mapping::{
    MappingConfig,
    MappingConfigBuilder,
    MappingMode,
};

pub use raster::{
    ColorSample,
    ProgressObserver,
    RasterBuffer,
    Rasterizer,
};

pub use png::{
    ImageWriter,
    RenderedImage,
    StandardPngWriter,
};

pub use conversions::{
    BitsToPngPipeline,
    PipelineTimings,
    RenderSummary,
};
