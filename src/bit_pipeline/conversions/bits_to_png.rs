use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::bit_pipeline::{
    bits::{BitSource, BitStream, ByteBitSource},
    common::error::{MappingError, Result},
    conversions::timing::PipelineTimings,
    layout::{Dimensions, plan_dimensions},
    mapping::MappingConfig,
    png::{ImageWriter, RenderedImage, StandardPngWriter, assemble},
    raster::{ProgressObserver, Rasterizer},
};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    /// Bits mapped after the optional window was applied
    pub bit_count: usize,
    /// Planned canvas, before magnification
    pub dimensions: Dimensions,
    pub output_width: u32,
    pub output_height: u32,
    pub channels: usize,
    /// Set when the image was persisted to disk
    pub output_path: Option<PathBuf>,
}

pub struct BitsToPngPipeline<S: BitSource, W: ImageWriter> {
    source: S,
    writer: W,
    config: MappingConfig,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl BitsToPngPipeline<ByteBitSource, StandardPngWriter> {
    pub fn new(config: MappingConfig) -> Self {
        Self {
            source: ByteBitSource,
            writer: StandardPngWriter,
            config,
            observer: None,
        }
    }
}

impl<S: BitSource, W: ImageWriter> BitsToPngPipeline<S, W> {
    pub fn with_custom(source: S, writer: W, config: MappingConfig) -> Self {
        Self {
            source,
            writer,
            config,
            observer: None,
        }
    }

    pub fn with_progress_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    fn read_bits(&self, input_data: &[u8]) -> Result<BitStream> {
        let bits = self.source.read_bits(input_data)?;

        let bits = match self.config.window {
            Some((start, end)) => {
                let window = bits.window(start, end).ok_or(MappingError::EmptyInput)?;
                debug!(
                    "Windowed {}..{}% of {} bits down to {} bits",
                    start,
                    end,
                    bits.len(),
                    window.len()
                );
                window
            }
            None => bits,
        };

        if bits.is_empty() {
            return Err(MappingError::EmptyInput);
        }

        debug!("Bit stream: {} bits, {:.2}% set", bits.len(), bits.density_percent());
        Ok(bits)
    }

    fn validate_dimensions(&self, dims: &Dimensions) -> Result<()> {
        let Some(max) = self.config.max_dimension else {
            return Ok(());
        };

        let scaled_width = dims.width as u64 * self.config.scale as u64;
        let scaled_height = dims.height as u64 * self.config.scale as u64;
        if scaled_width > max as u64 || scaled_height > max as u64 {
            warn!(
                "Output dimensions {}x{} exceed maximum {}",
                scaled_width, scaled_height, max
            );
            return Err(MappingError::InvalidDimensions(dims.width, dims.height));
        }

        Ok(())
    }

    /// Renders `input_data` fully in memory, without touching any output.
    fn render(
        &self,
        input_data: &[u8],
        timings: &mut PipelineTimings,
    ) -> Result<(RenderedImage, RenderSummary)> {
        let config = &self.config;
        config.validate()?;

        let bits = {
            let _span = tracing::info_span!("read_bits").entered();
            timings.time("read_bits", || self.read_bits(input_data))?
        };

        let dims = {
            let _span = tracing::info_span!("plan_dimensions", bits = bits.len()).entered();
            timings.time("plan_dimensions", || {
                plan_dimensions(bits.len(), config.ratio, config.multiple, config.cell_x, config.cell_y)
            })?
        };
        self.validate_dimensions(&dims)?;

        info!(
            width = dims.width,
            height = dims.height,
            zone_size = dims.zone_size,
            "Canvas planned"
        );

        let raster = timings.time("rasterize", || {
            let rasterizer = Rasterizer::from_config(config)?;
            rasterizer.rasterize(config, &bits, &dims, self.observer.as_deref())
        })?;

        let rendered = {
            let _span = tracing::info_span!("assemble", scale = config.scale).entered();
            timings.time("assemble", || assemble(&raster, config.scale))?
        };

        let summary = RenderSummary {
            bit_count: bits.len(),
            dimensions: dims,
            output_width: rendered.width(),
            output_height: rendered.height(),
            channels: raster.channels,
            output_path: None,
        };

        Ok((rendered, summary))
    }

    fn encode(&self, rendered: &RenderedImage, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_png").entered();
        self.writer.write_image(rendered, output)
    }

    /// Maps `input_data` to a PNG written into `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len(), mode = %self.config.mode))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<RenderSummary> {
        self.convert_with_timings(input_data, output)
            .map(|(summary, _)| summary)
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<(RenderSummary, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting bit mapping");

        let (rendered, summary) = self.render(input_data, &mut timings)?;
        timings.time("encode_png", || self.encode(&rendered, output))?;

        info!(
            width = summary.output_width,
            height = summary.output_height,
            "Mapping complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((summary, timings))
    }

    /// Maps `input_data` and persists the result as `<output_name>.png`.
    ///
    /// The file is only created once the image has been fully rendered and
    /// encoded, so a failed run never leaves a partial file behind.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert_bytes_to_file(&self, input_data: &[u8]) -> Result<RenderSummary> {
        self.convert_bytes_to_file_with_timings(input_data)
            .map(|(summary, _)| summary)
    }

    pub fn convert_bytes_to_file_with_timings(
        &self,
        input_data: &[u8],
    ) -> Result<(RenderSummary, PipelineTimings)> {
        let mut encoded = Vec::new();
        let (mut summary, mut timings) = self.convert_with_timings(input_data, &mut encoded)?;

        let output_path = self.config.output_path();
        timings.time("write_output", || write_output(&output_path, &encoded))?;

        info!(output = %output_path.display(), "Saved {} bytes", encoded.len());
        summary.output_path = Some(output_path);
        Ok((summary, timings))
    }

    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<RenderSummary> {
        self.convert_file_with_timings(input_path)
            .map(|(summary, _)| summary)
    }

    pub fn convert_file_with_timings<P: AsRef<Path>>(
        &self,
        input_path: P,
    ) -> Result<(RenderSummary, PipelineTimings)> {
        let input_path = input_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %self.config.output_path().display(),
            "Mapping file"
        );

        let mut timings = PipelineTimings::new();
        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            timings.time("read_input_file", || {
                std::fs::read(input_path).map_err(|e| {
                    MappingError::InputReadError(format!("{}: {}", input_path.display(), e))
                })
            })?
        };

        let (summary, conversion_timings) = self.convert_bytes_to_file_with_timings(&input_data)?;
        timings.extend(conversion_timings);

        Ok((summary, timings))
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MappingConfig) {
        self.config = config;
    }
}

fn write_output(path: &Path, encoded: &[u8]) -> Result<()> {
    let _span = tracing::info_span!("write_output").entered();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MappingError::OutputWriteError(format!("{}: {}", parent.display(), e))
            })?;
        }
    }

    std::fs::write(path, encoded)
        .map_err(|e| MappingError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
