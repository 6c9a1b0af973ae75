//! 3D point scatter of Cartesian star positions.

use std::path::Path;

use catalog::StarTable;
use plotters::prelude::*;

use crate::{Result, VizError};

/// Point cap for scatter plots; above this the table is strided down.
pub const DEFAULT_MAX_POINTS: usize = 50_000;

/// Render a 3D scatter of the table's `(x, y, z)` columns.
///
/// Axes are cubic and symmetric around the origin so the spatial
/// structure is not distorted. Tables larger than `max_points` are
/// subsampled with a fixed stride to keep render time bounded.
pub fn scatter_3d<P: AsRef<Path>>(table: &StarTable, path: P, max_points: usize) -> Result<()> {
    if table.is_empty() {
        return Err(VizError::Histogram(
            "cannot scatter an empty table".to_string(),
        ));
    }

    let stride = (table.len() / max_points.max(1)).max(1);
    let points: Vec<(f64, f64, f64)> = table
        .iter()
        .step_by(stride)
        .map(|star| (star.x, star.y, star.z))
        .collect();

    let extent = points
        .iter()
        .flat_map(|&(x, y, z)| [x.abs(), y.abs(), z.abs()])
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);

    let root = BitMapBackend::new(path.as_ref(), (1000, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Star positions ({} of {})", points.len(), table.len()),
            ("sans-serif", 28),
        )
        .margin(15)
        .build_cartesian_3d(-extent..extent, -extent..extent, -extent..extent)
        .map_err(VizError::render)?;

    chart
        .configure_axes()
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(VizError::render)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y, z)| Circle::new((x, y, z), 1, BLUE.mix(0.25).filled())),
        )
        .map_err(VizError::render)?;

    root.present().map_err(VizError::render)?;
    Ok(())
}
