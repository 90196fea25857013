use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env, Target};
use log::info;

use canny_edge::{
    grid, load_grayscale, overlay_edges, run, side_by_side, CannyError, CannyParams, Mode,
    Smoothing, TrackingMode,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SmoothingArg {
    Bilateral,
    Gaussian,
}

impl From<SmoothingArg> for Smoothing {
    fn from(arg: SmoothingArg) -> Self {
        match arg {
            SmoothingArg::Bilateral => Smoothing::Bilateral,
            SmoothingArg::Gaussian => Smoothing::Gaussian,
        }
    }
}

#[derive(Parser)]
#[command(name = "canny")]
#[command(about = "Educational Canny edge detector")]
#[command(version)]
struct Cli {
    /// Image source (png, jpg, ...)
    source: PathBuf,
    /// Smoothing strength (only used by the gaussian filter)
    sigma: f32,
    /// Lower threshold
    low: f32,
    /// Upper threshold
    high: f32,
    /// Render every intermediate step instead of only the edge map
    #[arg(long)]
    all: bool,
    /// Noise suppression filter
    #[arg(long, value_enum, default_value_t = SmoothingArg::Bilateral)]
    smoothing: SmoothingArg,
    /// Use connected-component hysteresis instead of the single-pass sweep
    #[arg(long)]
    connected: bool,
    /// Where to write the rendered grids
    #[arg(long, short, default_value = "edges.png")]
    output: PathBuf,
    /// Also write the edges painted over the source image
    #[arg(long)]
    overlay: Option<PathBuf>,
    /// Write log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logger for a run. With a log file every record down to `debug` is
/// written there unless `RUST_LOG` says otherwise; without one only errors
/// reach stderr by default.
fn logger_builder(env: Env<'_>, log_file: Option<&Path>) -> Result<Builder, CannyError> {
    let default_level = if log_file.is_some() { "debug" } else { "error" };
    let mut builder = Builder::from_env(env.default_filter_or(default_level));
    builder.format_timestamp_nanos();
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    Ok(builder)
}

fn main() -> Result<(), CannyError> {
    let cli = Cli::parse();
    logger_builder(Env::default(), cli.log_file.as_deref())?.init();

    info!("img_file {}", cli.source.display());
    let raw = load_grayscale(&cli.source)?;
    info!("img shape {}x{}", raw.height(), raw.width());

    let params = CannyParams {
        smoothing: cli.smoothing.into(),
        tracking: if cli.connected {
            TrackingMode::Connected
        } else {
            TrackingMode::SinglePass
        },
        ..CannyParams::new(cli.sigma, cli.low, cli.high)
    };
    let mode = if cli.all { Mode::Stepwise } else { Mode::Fast };

    let start = Instant::now();
    let output = run(&raw, &params, mode)?;
    info!("{:?} run took {:?}", mode, start.elapsed());

    side_by_side(&output.grids()).save(&cli.output)?;
    info!("wrote {}", cli.output.display());

    if let Some(path) = &cli.overlay {
        let source = grid::to_luma8(&raw);
        overlay_edges(&source, output.final_grid(), params.markers.strong).save(path)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
