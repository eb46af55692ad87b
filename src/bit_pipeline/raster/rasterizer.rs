use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument};

use crate::bit_pipeline::bits::BitStream;
use crate::bit_pipeline::common::error::{MappingError, Result};
use crate::bit_pipeline::layout::Dimensions;
use crate::bit_pipeline::mapping::{CellGeometry, MappingConfig, compute_pixel};
use crate::bit_pipeline::raster::progress::ProgressObserver;
use crate::bit_pipeline::raster::types::{ColorSample, RasterBuffer};

/// Evaluates every pixel of a canvas on a fixed-size worker pool.
///
/// Results are collected in row-major order (`line` outer, `column` inner)
/// whatever order the workers finish in.
pub struct Rasterizer {
    pool: ThreadPool,
    process_count: usize,
}

impl Rasterizer {
    pub fn new(process_count: usize) -> Result<Self> {
        if process_count == 0 {
            return Err(MappingError::InvalidConfig("process_count must be positive".to_string()));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(process_count)
            .thread_name(|i| format!("raster-{i}"))
            .build()
            .map_err(|e| MappingError::WorkerPool(e.to_string()))?;

        Ok(Self { pool, process_count })
    }

    pub fn from_config(config: &MappingConfig) -> Result<Self> {
        Self::new(config.process_count)
    }

    /// Rasterizes `bits` onto a `dims` canvas using the mode and cell of `config`.
    #[instrument(skip_all, fields(width = dims.width, height = dims.height, mode = %config.mode))]
    pub fn rasterize(
        &self,
        config: &MappingConfig,
        bits: &BitStream,
        dims: &Dimensions,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<RasterBuffer> {
        let geometry = CellGeometry::new(dims, config.cell_x, config.cell_y);
        let mode = config.mode;

        info!(
            "Starting rasterization on {} worker thread(s)",
            self.process_count
        );

        let samples = self.map_pixels(geometry.width, geometry.height, observer, |line, column| {
            compute_pixel(mode, bits, line, column, &geometry)
        })?;

        debug!("Collected {} samples", samples.len());

        Ok(RasterBuffer {
            width: dims.width,
            height: dims.height,
            channels: config.channel_count(),
            samples,
        })
    }

    /// Applies `pixel` to every (`line`, `column`) of a `width` x `height` grid.
    ///
    /// A panic in any task aborts the whole run and comes back as
    /// [`MappingError::WorkerFailure`].
    pub(crate) fn map_pixels<F>(
        &self,
        width: usize,
        height: usize,
        observer: Option<&dyn ProgressObserver>,
        pixel: F,
    ) -> Result<Vec<ColorSample>>
    where
        F: Fn(usize, usize) -> ColorSample + Sync,
    {
        let total = width * height;
        let done = AtomicUsize::new(0);

        let run = || -> Vec<ColorSample> {
            (0..total)
                .into_par_iter()
                .map(|idx| {
                    let sample = pixel(idx / width, idx % width);
                    if let Some(observer) = observer {
                        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                        if finished < total && crosses_percent(finished, total) {
                            observer.on_progress(finished, total);
                        }
                    }
                    sample
                })
                .collect()
        };

        let samples = panic::catch_unwind(AssertUnwindSafe(|| self.pool.install(run)))
            .map_err(|payload| MappingError::WorkerFailure(panic_message(payload.as_ref())))?;

        if let Some(observer) = observer {
            observer.on_progress(total, total);
        }

        Ok(samples)
    }
}

/// True when `done` is the first count to reach a new whole percentage.
#[inline]
fn crosses_percent(done: usize, total: usize) -> bool {
    (done * 100 / total) != ((done - 1) * 100 / total)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}
