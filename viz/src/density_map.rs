//! 2D binned density maps.

use std::path::Path;

use catalog::StarTable;
use plotters::prelude::*;

use crate::{Result, VizError};

/// Wrap a longitude in degrees to [-180, 180).
pub fn wrap_longitude(l: f64) -> f64 {
    ((l + 180.0).rem_euclid(360.0)) - 180.0
}

/// A 2D histogram over a fixed rectangular range.
///
/// Points outside the range are dropped, matching the behavior of the
/// plotting libraries this replaces.
#[derive(Debug, Clone)]
pub struct DensityMap {
    nx: usize,
    ny: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    counts: Vec<u32>,
}

impl DensityMap {
    /// Bin arbitrary `(x, y)` points into an `nx` by `ny` grid.
    pub fn from_points<I>(
        points: I,
        nx: usize,
        ny: usize,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        if nx == 0 || ny == 0 {
            return Err(VizError::Histogram("bin counts must be nonzero".to_string()));
        }
        if x_range.1 <= x_range.0 || y_range.1 <= y_range.0 {
            return Err(VizError::Histogram(format!(
                "degenerate range: x {x_range:?}, y {y_range:?}"
            )));
        }

        let mut counts = vec![0u32; nx * ny];
        for (x, y) in points {
            let Some(ix) = bin_index(x, x_range, nx) else {
                continue;
            };
            let Some(iy) = bin_index(y, y_range, ny) else {
                continue;
            };
            counts[iy * nx + ix] += 1;
        }

        Ok(Self {
            nx,
            ny,
            x_range,
            y_range,
            counts,
        })
    }

    /// Sky-map density of a star table: wrapped longitude against
    /// latitude over the full celestial range.
    pub fn sky_map(table: &StarTable, nx: usize, ny: usize) -> Result<Self> {
        Self::from_points(
            table.iter().map(|star| (wrap_longitude(star.l), star.b)),
            nx,
            ny,
            (-180.0, 180.0),
            (-90.0, 90.0),
        )
    }

    pub fn count(&self, ix: usize, iy: usize) -> u32 {
        self.counts[iy * self.nx + ix]
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Total number of binned points (excludes dropped out-of-range
    /// points).
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Render the map as a color-ramped cell grid.
    pub fn render_png<P: AsRef<Path>>(
        &self,
        path: P,
        title: &str,
        x_desc: &str,
        y_desc: &str,
    ) -> Result<()> {
        let root = BitMapBackend::new(path.as_ref(), (1200, 800)).into_drawing_area();
        root.fill(&WHITE).map_err(VizError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(self.x_range.0..self.x_range.1, self.y_range.0..self.y_range.1)
            .map_err(VizError::render)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .axis_desc_style(("sans-serif", 20))
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(VizError::render)?;

        let max_count = self.max_count().max(1) as f64;
        let dx = (self.x_range.1 - self.x_range.0) / self.nx as f64;
        let dy = (self.y_range.1 - self.y_range.0) / self.ny as f64;

        chart
            .draw_series(self.counts.iter().enumerate().filter_map(|(i, &count)| {
                if count == 0 {
                    return None;
                }
                let ix = i % self.nx;
                let iy = i / self.nx;
                let x0 = self.x_range.0 + ix as f64 * dx;
                let y0 = self.y_range.0 + iy as f64 * dy;
                // Log scaling keeps the dense galactic plane from
                // saturating everything else.
                let t = (count as f64).ln_1p() / max_count.ln_1p();
                let color = HSLColor(240.0 / 360.0 * (1.0 - t), 1.0, 0.5);
                Some(Rectangle::new(
                    [(x0, y0), (x0 + dx, y0 + dy)],
                    color.filled(),
                ))
            }))
            .map_err(VizError::render)?;

        root.present().map_err(VizError::render)?;
        Ok(())
    }
}

fn bin_index(value: f64, range: (f64, f64), bins: usize) -> Option<usize> {
    if !value.is_finite() || value < range.0 || value > range.1 {
        return None;
    }
    let t = (value - range.0) / (range.1 - range.0);
    Some(((t * bins as f64) as usize).min(bins - 1))
}
