//! Per-pixel aggregation.
//!
//! Every pixel of the canvas reads a small window of the bit stream and turns
//! it into one colour. The computation is pure: it only reads the stream and
//! the scalar geometry, so pixels can be evaluated in any order.
//!
//! Indices past the end of the stream are handled locally by each mode:
//!
//! - `Bin` renders the pixel white.
//! - `Offset` and `Split` discard the running channel sum and restart from
//!   zero; later in-range bits of the same window still add onto it.
//! - `YOffset` counts the missing bit as zero and keeps the running sum.
//!
//! The `Offset`/`Split` reset keeps renders identical to those produced by
//! earlier versions of the mapper.

use crate::bit_pipeline::bits::BitStream;
use crate::bit_pipeline::layout::{Dimensions, linear_map};
use crate::bit_pipeline::mapping::types::MappingMode;
use crate::bit_pipeline::raster::ColorSample;

/// Scalar geometry shared by every pixel of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: usize,
    pub height: usize,
    pub cell_x: usize,
    pub cell_y: usize,
    pub zone_size: usize,
}

impl CellGeometry {
    pub fn new(dims: &Dimensions, cell_x: u32, cell_y: u32) -> Self {
        Self {
            width: dims.width as usize,
            height: dims.height as usize,
            cell_x: cell_x as usize,
            cell_y: cell_y as usize,
            zone_size: dims.zone_size,
        }
    }
}

/// Computes the colour of the pixel at (`line`, `column`).
pub fn compute_pixel(
    mode: MappingMode,
    bits: &BitStream,
    line: usize,
    column: usize,
    geometry: &CellGeometry,
) -> ColorSample {
    match mode {
        MappingMode::Bin => bin_pixel(bits, line, column, geometry),
        MappingMode::Offset => offset_pixel(bits, line, column, geometry),
        MappingMode::YOffset => y_offset_pixel(bits, line, column, geometry),
        MappingMode::Split => split_pixel(bits, line, column, geometry),
    }
}

fn bin_pixel(bits: &BitStream, line: usize, column: usize, g: &CellGeometry) -> ColorSample {
    match bits.bit_at(line * g.width + column) {
        Some(1) => ColorSample::BLACK,
        _ => ColorSample::WHITE,
    }
}

fn offset_pixel(bits: &BitStream, line: usize, column: usize, g: &CellGeometry) -> ColorSample {
    let mut sample = ColorSample::new();
    for y in 0..g.cell_y {
        let row_start = (line * g.cell_y + y) * g.width * g.cell_x + column * g.cell_x;
        let sum = resetting_sum(bits, (0..g.cell_x).map(|x| row_start + x));
        sample.push(channel_value(sum, g.cell_x));
    }
    sample
}

fn y_offset_pixel(bits: &BitStream, line: usize, column: usize, g: &CellGeometry) -> ColorSample {
    let mut sample = ColorSample::new();
    for x in 0..g.cell_x {
        let sum: usize = (0..g.cell_y)
            .map(|y| (line * g.cell_y + y) * g.width * g.cell_x + column * g.cell_x + x)
            .map(|idx| bits.bit_at(idx).unwrap_or(0) as usize)
            .sum();
        sample.push(channel_value(sum, g.cell_y));
    }
    sample
}

fn split_pixel(bits: &BitStream, line: usize, column: usize, g: &CellGeometry) -> ColorSample {
    let mut sample = ColorSample::new();
    for y in 0..g.cell_y {
        let zone_start = line * g.width * g.cell_x + g.zone_size * y + column * g.cell_x;
        let sum = resetting_sum(bits, (0..g.cell_x).map(|x| zone_start + x));
        sample.push(channel_value(sum, g.cell_x));
    }
    sample
}

/// Sums the bits at `indices`, restarting from zero at every missing index.
fn resetting_sum(bits: &BitStream, indices: impl Iterator<Item = usize>) -> usize {
    let mut sum = 0usize;
    for idx in indices {
        match bits.bit_at(idx) {
            Some(bit) => sum += bit as usize,
            None => sum = 0,
        }
    }
    sum
}

/// Scales a count of set bits out of `span` onto `0..=255`, truncating.
#[inline]
fn channel_value(sum: usize, span: usize) -> u8 {
    linear_map(sum as f64, 0.0, span as f64, 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resetting_sum_restarts_after_missing_index() {
        let bits = BitStream::from_bytes(vec![0xFF]);
        // 1 + (missing -> 0) + 1 + 1
        assert_eq!(resetting_sum(&bits, [0, 99, 1, 2].into_iter()), 2);
        assert_eq!(resetting_sum(&bits, [0, 1, 2, 99].into_iter()), 0);
        assert_eq!(resetting_sum(&bits, [0, 1, 2].into_iter()), 3);
    }
}
