//! 1D histograms with percentile trimming.

use std::path::Path;

use itertools::Itertools;
use plotters::prelude::*;

use crate::{Result, VizError};

/// Linearly interpolated quantile of an ascending-sorted slice.
///
/// `q` is clamped to [0, 1]. Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    Some(sorted[below] + (sorted[above] - sorted[below]) * fraction)
}

/// A fixed-range 1D histogram. Values outside the range are dropped.
#[derive(Debug, Clone)]
pub struct Histogram {
    range: (f64, f64),
    counts: Vec<u32>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets over `range`.
    pub fn from_values(values: &[f64], bins: usize, range: (f64, f64)) -> Result<Self> {
        if bins == 0 {
            return Err(VizError::Histogram("bin count must be nonzero".to_string()));
        }
        if range.1 <= range.0 {
            return Err(VizError::Histogram(format!("degenerate range: {range:?}")));
        }

        let width = (range.1 - range.0) / bins as f64;
        let mut counts = vec![0u32; bins];
        for &value in values {
            if !value.is_finite() || value < range.0 || value > range.1 {
                continue;
            }
            let index = (((value - range.0) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Ok(Self { range, counts })
    }

    /// Histogram over the `[lower_q, upper_q]` quantile range of the
    /// finite values, discarding the tails. This is the view used for
    /// distance distributions, where a handful of extreme estimates
    /// would otherwise stretch the axis to uselessness.
    pub fn trimmed(values: &[f64], bins: usize, lower_q: f64, upper_q: f64) -> Result<Self> {
        let sorted: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .sorted_by(f64::total_cmp)
            .collect();

        let (Some(lo), Some(hi)) = (quantile(&sorted, lower_q), quantile(&sorted, upper_q))
        else {
            return Err(VizError::Histogram(
                "cannot trim an empty value set".to_string(),
            ));
        };
        if hi <= lo {
            return Err(VizError::Histogram(format!(
                "trim range collapsed: [{lo}, {hi}]"
            )));
        }

        Self::from_values(&sorted, bins, (lo, hi))
    }

    pub fn bins(&self) -> &[u32] {
        &self.counts
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Total number of binned values.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Render as a bar chart.
    pub fn render_png<P: AsRef<Path>>(&self, path: P, title: &str, x_desc: &str) -> Result<()> {
        let root = BitMapBackend::new(path.as_ref(), (1200, 800)).into_drawing_area();
        root.fill(&WHITE).map_err(VizError::render)?;

        let max_count = self.counts.iter().copied().max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(self.range.0..self.range.1, 0u32..max_count)
            .map_err(VizError::render)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc("Count")
            .axis_desc_style(("sans-serif", 20))
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(VizError::render)?;

        let width = (self.range.1 - self.range.0) / self.counts.len() as f64;
        chart
            .draw_series(self.counts.iter().enumerate().filter_map(|(i, &count)| {
                if count == 0 {
                    return None;
                }
                let x0 = self.range.0 + i as f64 * width;
                Some(Rectangle::new(
                    [(x0, 0), (x0 + width, count)],
                    BLUE.mix(0.6).filled(),
                ))
            }))
            .map_err(VizError::render)?;

        root.present().map_err(VizError::render)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&sorted, 0.0).unwrap(), 0.0);
        assert_relative_eq!(quantile(&sorted, 1.0).unwrap(), 4.0);
        assert_relative_eq!(quantile(&sorted, 0.5).unwrap(), 2.0);
        assert_relative_eq!(quantile(&sorted, 0.625).unwrap(), 2.5);
    }

    #[test]
    fn test_quantile_empty() {
        assert!(quantile(&[], 0.5).is_none());
    }

    #[test]
    fn test_basic_binning() {
        let values = [0.5, 1.5, 1.6, 9.0, 100.0];
        let histogram = Histogram::from_values(&values, 10, (0.0, 10.0)).unwrap();
        assert_eq!(histogram.bins()[0], 1);
        assert_eq!(histogram.bins()[1], 2);
        assert_eq!(histogram.bins()[9], 1);
        // 100.0 is out of range.
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn test_trimmed_drops_tails() {
        // 0..=100 with one absurd outlier.
        let mut values: Vec<f64> = (0..=100).map(f64::from).collect();
        values.push(1e12);

        let histogram = Histogram::trimmed(&values, 10, 0.01, 0.99).unwrap();
        let (lo, hi) = histogram.range();
        assert!(lo >= 0.0);
        assert!(hi < 1e6, "outlier should not set the range, got hi={hi}");
        assert!(histogram.total() >= 98);
    }

    #[test]
    fn test_trimmed_empty_is_error() {
        assert!(matches!(
            Histogram::trimmed(&[], 10, 0.01, 0.99),
            Err(VizError::Histogram(_))
        ));
    }

    #[test]
    fn test_trimmed_constant_values_is_error() {
        let values = [5.0; 32];
        assert!(matches!(
            Histogram::trimmed(&values, 10, 0.01, 0.99),
            Err(VizError::Histogram(_))
        ));
    }
}
