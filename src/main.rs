use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use bitmapper::bit_pipeline::{BitsToPngPipeline, MappingConfig, MappingMode};
use bitmapper::logger;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// One bit per pixel: black for 1, white for 0
    Bin,
    /// One channel per cell row
    Offset,
    /// One channel per cell column
    YOffset,
    /// One channel per zone of the file
    Split,
}

impl From<Mode> for MappingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bin => MappingMode::Bin,
            Mode::Offset => MappingMode::Offset,
            Mode::YOffset => MappingMode::YOffset,
            Mode::Split => MappingMode::Split,
        }
    }
}

/// Render a binary file as a PNG fingerprint of its bits
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File to render
    input: PathBuf,

    /// Size of one canvas pixel in the output image
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// Target width:height ratio, as a number or a fraction like 16/9
    #[arg(long, default_value = "16/9", value_parser = parse_ratio)]
    ratio: f64,

    /// Canvas width is rounded up to a multiple of this
    #[arg(long, default_value_t = 16)]
    multiple: u32,

    /// Cell width in bits; several comma-separated values render one image each
    #[arg(long, default_value = "1", value_delimiter = ',', num_args = 1..)]
    cell_x: Vec<u32>,

    /// Cell height in bits
    #[arg(long, default_value_t = 1)]
    cell_y: u32,

    #[arg(long, value_enum, default_value_t = Mode::Bin)]
    mode: Mode,

    /// Output name without extension [default: <input>-<mode>]
    #[arg(long)]
    name: Option<String>,

    /// Worker threads
    #[arg(long, default_value_t = 2)]
    processes: usize,

    /// Start of the rendered slice, in percent of the file
    #[arg(long)]
    start: Option<f64>,

    /// End of the rendered slice, in percent of the file
    #[arg(long)]
    end: Option<f64>,

    /// Refuse to render images wider or taller than this
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Log per-stage timings after each render
    #[arg(long)]
    timings: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let value = match s.split_once(['/', ':']) {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|e| format!("invalid ratio width: {e}"))?;
            let h: f64 = h.trim().parse().map_err(|e| format!("invalid ratio height: {e}"))?;
            w / h
        }
        None => s.trim().parse().map_err(|e| format!("invalid ratio: {e}"))?,
    };

    if !(value.is_finite() && value > 0.0) {
        return Err(format!("ratio must be positive, got {s}"));
    }
    Ok(value)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    if args.cell_x.is_empty() {
        bail!("at least one --cell-x value is required");
    }

    let mode = MappingMode::from(args.mode);
    let base_name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-{}", args.input.display(), mode));
    let window = match (args.start, args.end) {
        (None, None) => None,
        (start, end) => Some((start.unwrap_or(0.0), end.unwrap_or(100.0))),
    };

    info!("Starting bitmapper on {}", args.input.display());

    for &cell_x in &args.cell_x {
        let output_name = if args.cell_x.len() > 1 {
            format!("{base_name}-{cell_x}")
        } else {
            base_name.clone()
        };

        let config = MappingConfig::builder()
            .scale(args.scale)
            .ratio(args.ratio)
            .multiple(args.multiple)
            .cell(cell_x, args.cell_y)
            .mode(mode)
            .output_name(output_name)
            .process_count(args.processes)
            .window(window)
            .max_dimension(args.max_dimension)
            .build();

        let last_decile = AtomicUsize::new(0);
        let pipeline = BitsToPngPipeline::new(config).with_progress_observer(move |done: usize, total: usize| {
            let decile = done * 10 / total.max(1);
            if decile > last_decile.fetch_max(decile, Ordering::Relaxed) {
                info!("{}% ({} of {} pixels)", decile * 10, done, total);
            }
        });

        info!(
            "Mode: {}, cell: {}x{}, scale: {}, ratio: {:.4}, multiple: {}",
            mode, cell_x, args.cell_y, args.scale, args.ratio, args.multiple
        );

        let (summary, timings) = pipeline
            .convert_file_with_timings(&args.input)
            .with_context(|| format!("failed to map {}", args.input.display()))?;

        if let Some(path) = &summary.output_path {
            info!(
                "Saved {} ({}x{}, {} channel(s))",
                path.display(),
                summary.output_width,
                summary.output_height,
                summary.channels
            );
        }

        if args.timings {
            timings.log_summary();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("2").unwrap(), 2.0);
        assert_eq!(parse_ratio("16/9").unwrap(), 16.0 / 9.0);
        assert_eq!(parse_ratio("4:3").unwrap(), 4.0 / 3.0);
        assert!(parse_ratio("0").is_err());
        assert!(parse_ratio("1/0").is_err());
        assert!(parse_ratio("wide").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "bitmapper", "dump.bin", "--mode", "y-offset", "--cell-x", "3", "--cell-y", "8",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::YOffset));
        assert_eq!(args.cell_x, vec![3]);
        assert_eq!(args.scale, 4);
        assert_eq!(args.multiple, 16);
    }

    #[test]
    fn test_args_processes_default_matches_library() {
        let args = Args::try_parse_from(["bitmapper", "dump.bin"]).unwrap();
        assert_eq!(args.processes, MappingConfig::default().process_count);

        let args = Args::try_parse_from(["bitmapper", "dump.bin", "--processes", "8"]).unwrap();
        assert_eq!(args.processes, 8);
    }

    #[test]
    fn test_args_cell_sweep() {
        let args = Args::try_parse_from(["bitmapper", "dump.bin", "--cell-x", "64,32,1"]).unwrap();
        assert_eq!(args.cell_x, vec![64, 32, 1]);
    }
}
