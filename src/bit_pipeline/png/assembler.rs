//! Image assembly from a raster buffer.
//!
//! The buffer is reshaped row by row into an image whose colour type follows
//! the channel count (1: L8, 2: LA8, 3: RGB8, 4: RGBA8), then magnified by an
//! integer factor with nearest-neighbour sampling so each logical cell stays
//! a crisp block.

use image::imageops::FilterType;
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use tracing::debug;

use crate::bit_pipeline::common::error::{MappingError, Result};
use crate::bit_pipeline::raster::RasterBuffer;

/// Final, magnified image ready to be encoded.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub image: DynamicImage,
    /// Canvas width before magnification
    pub source_width: u32,
    /// Canvas height before magnification
    pub source_height: u32,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Builds the output image from `buffer` and magnifies it by `scale`.
pub fn assemble(buffer: &RasterBuffer, scale: u32) -> Result<RenderedImage> {
    let (width, height) = (buffer.width, buffer.height);
    if width == 0 || height == 0 {
        return Err(MappingError::InvalidDimensions(width, height));
    }
    if scale == 0 {
        return Err(MappingError::InvalidConfig("scale must be positive".to_string()));
    }

    let scaled_width = width.checked_mul(scale);
    let scaled_height = height.checked_mul(scale);
    let (Some(scaled_width), Some(scaled_height)) = (scaled_width, scaled_height) else {
        return Err(MappingError::InvalidDimensions(width, height));
    };

    let bytes = buffer.to_interleaved();
    let image = match buffer.channels {
        1 => GrayImage::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, bytes).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8),
        n => {
            return Err(MappingError::InvalidConfig(format!(
                "cannot build an image with {n} channels per pixel"
            )));
        }
    }
    .ok_or(MappingError::InvalidDimensions(width, height))?;

    debug!(
        "Assembled {}x{} image with {} channel(s), scaling to {}x{}",
        width, height, buffer.channels, scaled_width, scaled_height
    );

    let image = if scale == 1 {
        image
    } else {
        image.resize_exact(scaled_width, scaled_height, FilterType::Nearest)
    };

    Ok(RenderedImage {
        image,
        source_width: width,
        source_height: height,
    })
}
