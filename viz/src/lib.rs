//! Plot rendering for transformed star tables.
//!
//! Everything here is presentation-only: plots are written to PNG
//! files so the fetch-transform-cache core stays headless. The
//! [`render`] dispatcher covers the standard exploratory views; the
//! underlying [`density_map::DensityMap`] and [`histogram::Histogram`]
//! types are public for ad-hoc column pairs.

use std::path::Path;

use catalog::StarTable;
use thiserror::Error;

/// Error types for visualization operations.
#[derive(Debug, Error)]
pub enum VizError {
    /// Histogram or density-map construction error: empty input,
    /// degenerate range, or zero bins.
    #[error("Histogram error: {0}")]
    Histogram(String),

    /// Backend drawing failure.
    #[error("Render error: {0}")]
    Render(String),

    /// File I/O failure while writing plot output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    pub(crate) fn render<E: std::fmt::Display>(err: E) -> Self {
        VizError::Render(err.to_string())
    }
}

/// Standard Result type for all visualization operations.
pub type Result<T> = std::result::Result<T, VizError>;

pub mod density_map;
pub mod histogram;
pub mod scatter;

pub use density_map::DensityMap;
pub use histogram::Histogram;

/// The exploratory views rendered from a star table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// 2D binned density of (longitude, latitude), longitude wrapped
    /// to [-180, 180).
    SkyDensity,
    /// 3D point scatter of the Cartesian positions.
    Scatter3d,
    /// 1D histogram of radial distance, percentile-trimmed.
    DistanceHistogram,
}

/// Render one plot of `table` to a PNG at `path`.
pub fn render<P: AsRef<Path>>(table: &StarTable, kind: PlotKind, path: P) -> Result<()> {
    log::info!(
        "Rendering {:?} for {} stars to {}",
        kind,
        table.len(),
        path.as_ref().display()
    );
    match kind {
        PlotKind::SkyDensity => DensityMap::sky_map(table, 200, 200)?.render_png(
            path,
            "Sky density",
            "Galactic longitude (deg)",
            "Galactic latitude (deg)",
        ),
        PlotKind::Scatter3d => scatter::scatter_3d(table, path, scatter::DEFAULT_MAX_POINTS),
        PlotKind::DistanceHistogram => {
            let distances: Vec<f64> = table.iter().map(|star| star.d).collect();
            Histogram::trimmed(&distances, 100, 0.01, 0.99)?.render_png(
                path,
                "Distance distribution",
                "Distance (pc)",
            )
        }
    }
}
