//! Pipeline driver: load-or-fetch the transformed Gaia table, then
//! render one exploratory plot.
//!
//! With no arguments this reproduces the original workflow: cache at
//! `data/stars_transformed.csv.gz`, one million rows, sky density map.
//! Delete the cache file to force a re-fetch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use catalog::{load_or_fetch, ChunkGrid, PipelineConfig, TapClient};
use viz::PlotKind;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Plot {
    /// 2D density of (longitude, latitude).
    SkyDensity,
    /// 3D scatter of Cartesian positions.
    Scatter3d,
    /// Histogram of radial distance.
    DistanceHistogram,
}

impl From<Plot> for PlotKind {
    fn from(plot: Plot) -> Self {
        match plot {
            Plot::SkyDensity => PlotKind::SkyDensity,
            Plot::Scatter3d => PlotKind::Scatter3d,
            Plot::DistanceHistogram => PlotKind::DistanceHistogram,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "galaxy_map",
    about = "Fetches the Gaia star catalog (or loads the cached copy) and renders a plot",
    long_about = None
)]
struct Args {
    /// Cache artifact path; a .gz suffix enables compression
    #[arg(long, default_value = catalog::pipeline::DEFAULT_ARTIFACT_PATH)]
    cache: PathBuf,

    /// Maximum number of rows to request from the archive
    #[arg(long, default_value_t = catalog::pipeline::DEFAULT_ROW_LIMIT)]
    limit: usize,

    /// Which plot to render
    #[arg(long, value_enum, default_value_t = Plot::SkyDensity)]
    plot: Plot,

    /// Output PNG path
    #[arg(long, default_value = "plots/galaxy_map.png")]
    output: PathBuf,

    /// Cell side length (parsecs) for the chunk statistics log line
    #[arg(long, default_value_t = 50.0)]
    chunk_size: f64,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig {
        artifact_path: args.cache.clone(),
        row_limit: args.limit,
    };

    let client = TapClient::gaia();
    let table = load_or_fetch(&client, &config)?;
    log::info!("Star table ready: {} rows", table.len());

    if !table.is_empty() {
        let grid = ChunkGrid::build(&table, args.chunk_size);
        log::info!(
            "Spatial spread: {} occupied {}pc cells",
            grid.occupied_cells(),
            grid.cell_size()
        );
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    viz::render(&table, args.plot.into(), &args.output)?;
    println!("Plot saved to: {}", args.output.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("galaxy_map failed: {err}");
            ExitCode::FAILURE
        }
    }
}
