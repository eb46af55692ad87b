use tracing::debug;

use crate::bit_pipeline::common::error::{MappingError, Result};
use crate::bit_pipeline::layout::arith::{lcm, next_multiple};

/// Canvas geometry derived once per run from the bit count and configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Canvas width in pixels, a multiple of `lcm(multiple, cell_x)`
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// `cell_x / cell_y`
    pub cell_ratio: f64,
    /// `bit_count / cell_y`, the zone stride used by split mode
    pub zone_size: usize,
}

impl Dimensions {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Plans the canvas for `bit_count` bits.
///
/// The canvas approaches the requested `ratio` once each pixel is known to
/// consume a `cell_x` by `cell_y` window of bits. Width is aligned to
/// `lcm(multiple, cell_x)`, height only to whole pixels.
pub fn plan_dimensions(
    bit_count: usize,
    ratio: f64,
    multiple: u32,
    cell_x: u32,
    cell_y: u32,
) -> Result<Dimensions> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(MappingError::InvalidConfig(format!("ratio must be positive, got {ratio}")));
    }
    if multiple == 0 || cell_x == 0 || cell_y == 0 {
        return Err(MappingError::InvalidConfig(format!(
            "multiple and cell dimensions must be positive, got multiple={multiple}, cell={cell_x}x{cell_y}"
        )));
    }
    if bit_count == 0 {
        return Err(MappingError::EmptyInput);
    }

    let cell_ratio = cell_x as f64 / cell_y as f64;
    let size_corrector_x = cell_x as f64;
    let size_corrector_y = cell_y as f64;

    let root = (bit_count as f64).sqrt();
    let stretch = (ratio * cell_ratio).sqrt();
    let raw_width = root * stretch / size_corrector_x;
    let raw_height = root * (1.0 / stretch) / size_corrector_y;

    let alignment = lcm(multiple as u64, cell_x as u64);
    let (Some(width), Some(height)) = (
        next_multiple(raw_width, alignment),
        next_multiple(raw_height, 1),
    ) else {
        return Err(MappingError::InvalidDimensions(saturate(raw_width), saturate(raw_height)));
    };

    debug!(
        raw_width,
        raw_height,
        alignment,
        width,
        height,
        "Planned canvas"
    );

    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(MappingError::InvalidDimensions(
            u32::try_from(width).unwrap_or(u32::MAX),
            u32::try_from(height).unwrap_or(u32::MAX),
        ));
    };
    if width == 0 || height == 0 {
        return Err(MappingError::InvalidDimensions(width, height));
    }

    Ok(Dimensions {
        width,
        height,
        cell_ratio,
        zone_size: bit_count / cell_y as usize,
    })
}

/// Rounds a planned extent up to whole pixels, clamped to `u32`.
fn saturate(extent: f64) -> u32 {
    extent.ceil() as u32
}
