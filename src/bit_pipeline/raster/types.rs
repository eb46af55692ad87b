//! Raster data types

use crate::bit_pipeline::mapping::MAX_CHANNELS;

/// Colour of one output pixel: between one and four channel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    channels: [u8; MAX_CHANNELS],
    len: u8,
}

impl ColorSample {
    pub const WHITE: ColorSample = ColorSample { channels: [255, 255, 255, 0], len: 3 };
    pub const BLACK: ColorSample = ColorSample { channels: [0, 0, 0, 0], len: 3 };

    pub fn new() -> Self {
        Self { channels: [0; MAX_CHANNELS], len: 0 }
    }

    /// Builds a sample from up to four channel values; extra values are ignored.
    pub fn from_channels(values: &[u8]) -> Self {
        let mut sample = Self::new();
        for &value in values.iter().take(MAX_CHANNELS) {
            sample.push(value);
        }
        sample
    }

    /// Appends a channel. Channels beyond the fourth are dropped.
    #[inline]
    pub fn push(&mut self, value: u8) {
        let len = self.len as usize;
        if len < MAX_CHANNELS {
            self.channels[len] = value;
            self.len += 1;
        }
    }

    pub fn channels(&self) -> &[u8] {
        &self.channels[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ColorSample {
    fn default() -> Self {
        Self::new()
    }
}

/// Row-major pixel buffer produced by the rasterizer.
///
/// Sample `line * width + column` holds the pixel at (`line`, `column`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pub width: u32,
    pub height: u32,
    /// Channels carried by every sample
    pub channels: usize,
    pub samples: Vec<ColorSample>,
}

impl RasterBuffer {
    pub fn sample(&self, line: u32, column: u32) -> Option<&ColorSample> {
        if line >= self.height || column >= self.width {
            return None;
        }
        self.samples.get(line as usize * self.width as usize + column as usize)
    }

    /// Flattens the samples into interleaved channel bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * self.channels);
        for sample in &self.samples {
            bytes.extend_from_slice(sample.channels());
        }
        bytes
    }
}
