//! PNG output module
//!
//! This module assembles the raster buffer into a magnified image and encodes
//! it as PNG.

mod assembler;
mod writer;
mod standard_png_writer;

pub use assembler::{RenderedImage, assemble};
pub use writer::ImageWriter;
pub use standard_png_writer::StandardPngWriter;
