//! Mapping configuration types

use std::fmt;
use std::path::PathBuf;

use crate::bit_pipeline::common::error::{MappingError, Result};

/// Largest number of channels an output pixel can carry (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// Aggregation strategy deciding how a cell's bits become channel values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    /// One bit per pixel, black for 1 and white for 0
    Bin,
    /// One channel per cell row, summing `cell_x` consecutive bits
    Offset,
    /// One channel per cell column, summing `cell_y` bits down the column
    YOffset,
    /// One channel per zone, each zone a `bit_count / cell_y` slice of the stream
    Split,
}

impl MappingMode {
    /// Number of channels a pixel produced in this mode carries.
    pub fn channel_count(self, cell_x: u32, cell_y: u32) -> usize {
        match self {
            MappingMode::Bin => 3,
            MappingMode::Offset | MappingMode::Split => cell_y as usize,
            MappingMode::YOffset => cell_x as usize,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MappingMode::Bin => "bin",
            MappingMode::Offset => "offset",
            MappingMode::YOffset => "y-offset",
            MappingMode::Split => "split",
        }
    }
}

impl fmt::Display for MappingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a bit-to-PNG mapping run
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Integer magnification applied after rendering
    pub scale: u32,
    /// Target width:height ratio of the canvas
    pub ratio: f64,
    /// Canvas width is aligned to a multiple of this (combined with `cell_x`)
    pub multiple: u32,
    /// Width of the aggregation window, in bits
    pub cell_x: u32,
    /// Height of the aggregation window, in bits
    pub cell_y: u32,
    /// Aggregation strategy
    pub mode: MappingMode,
    /// Output file name without the `.png` extension
    pub output_name: String,
    /// Number of rasterization worker threads
    pub process_count: usize,
    /// Optional relative slice of the bit stream, in percent
    pub window: Option<(f64, f64)>,
    /// Reject canvases whose scaled width or height exceeds this
    pub max_dimension: Option<u32>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            ratio: 1.0,
            multiple: 1,
            cell_x: 1,
            cell_y: 1,
            mode: MappingMode::Offset,
            output_name: "generated".to_string(),
            process_count: 2,
            window: None,
            max_dimension: None,
        }
    }
}

impl MappingConfig {
    pub fn builder() -> MappingConfigBuilder {
        MappingConfigBuilder::default()
    }

    /// Channels per output pixel for the configured mode and cell.
    pub fn channel_count(&self) -> usize {
        self.mode.channel_count(self.cell_x, self.cell_y)
    }

    /// Path the rendered image is persisted to: `<output_name>.png`.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.png", self.output_name))
    }

    /// Rejects configurations the planner and rasterizer cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(MappingError::InvalidConfig(format!(
                "ratio must be a positive number, got {}",
                self.ratio
            )));
        }

        for (name, value) in [
            ("scale", self.scale),
            ("multiple", self.multiple),
            ("cell_x", self.cell_x),
            ("cell_y", self.cell_y),
        ] {
            if value == 0 {
                return Err(MappingError::InvalidConfig(format!("{name} must be positive")));
            }
        }

        if self.process_count == 0 {
            return Err(MappingError::InvalidConfig("process_count must be positive".to_string()));
        }

        if self.output_name.is_empty() {
            return Err(MappingError::InvalidConfig("output_name must not be empty".to_string()));
        }

        let channels = self.channel_count();
        if channels > MAX_CHANNELS {
            return Err(MappingError::InvalidConfig(format!(
                "{} mode with a {}x{} cell yields {} channels, at most {} fit in a pixel",
                self.mode, self.cell_x, self.cell_y, channels, MAX_CHANNELS
            )));
        }

        if let Some((start, end)) = self.window {
            let in_range = |pct: f64| pct.is_finite() && (0.0..=100.0).contains(&pct);
            if !in_range(start) || !in_range(end) {
                return Err(MappingError::InvalidConfig(format!(
                    "window bounds must lie within 0..=100 percent, got {start}..{end}"
                )));
            }
        }

        if self.max_dimension == Some(0) {
            return Err(MappingError::InvalidConfig("max_dimension must be positive".to_string()));
        }

        Ok(())
    }
}

/// Builder for MappingConfig
#[derive(Default)]
pub struct MappingConfigBuilder {
    scale: Option<u32>,
    ratio: Option<f64>,
    multiple: Option<u32>,
    cell_x: Option<u32>,
    cell_y: Option<u32>,
    mode: Option<MappingMode>,
    output_name: Option<String>,
    process_count: Option<usize>,
    window: Option<Option<(f64, f64)>>,
    max_dimension: Option<Option<u32>>,
}

impl MappingConfigBuilder {
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    pub fn multiple(mut self, multiple: u32) -> Self {
        self.multiple = Some(multiple);
        self
    }

    pub fn cell(mut self, cell_x: u32, cell_y: u32) -> Self {
        self.cell_x = Some(cell_x);
        self.cell_y = Some(cell_y);
        self
    }

    pub fn mode(mut self, mode: MappingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    pub fn process_count(mut self, count: usize) -> Self {
        self.process_count = Some(count);
        self
    }

    pub fn window(mut self, window: Option<(f64, f64)>) -> Self {
        self.window = Some(window);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> MappingConfig {
        let default = MappingConfig::default();
        MappingConfig {
            scale: self.scale.unwrap_or(default.scale),
            ratio: self.ratio.unwrap_or(default.ratio),
            multiple: self.multiple.unwrap_or(default.multiple),
            cell_x: self.cell_x.unwrap_or(default.cell_x),
            cell_y: self.cell_y.unwrap_or(default.cell_y),
            mode: self.mode.unwrap_or(default.mode),
            output_name: self.output_name.unwrap_or(default.output_name),
            process_count: self.process_count.unwrap_or(default.process_count),
            window: self.window.unwrap_or(default.window),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
