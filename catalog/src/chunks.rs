//! Spatial partitioning of a star table into cubic cells.
//!
//! Cells are keyed by the floor-divided Cartesian position, so a star
//! at `p` lives in cell `floor(p / cell_size)`. Sphere queries scan
//! only the cells overlapping the sphere's bounding cube and filter
//! the candidates by actual distance.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::table::StarTable;

/// Integer cell coordinate.
pub type CellKey = (i64, i64, i64);

/// Fixed-size cubic grid over the Cartesian positions of a table.
///
/// Stores row indices, not record copies; queries borrow from the
/// table they were built over.
#[derive(Debug)]
pub struct ChunkGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl ChunkGrid {
    /// Partition `table` into cubic cells of side `cell_size`.
    ///
    /// # Panics
    /// Panics if `cell_size` is not strictly positive.
    pub fn build(table: &StarTable, cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");

        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (index, star) in table.iter().enumerate() {
            cells
                .entry(cell_key(&star.position(), cell_size))
                .or_default()
                .push(index);
        }

        Self { cell_size, cells }
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of stars in the given cell.
    pub fn cell_len(&self, key: CellKey) -> usize {
        self.cells.get(&key).map_or(0, Vec::len)
    }

    /// Row indices of stars within `radius` of `center`.
    ///
    /// Only cells intersecting the sphere's bounding cube are scanned;
    /// candidates are then filtered by exact distance. Indices come
    /// back in table order within each cell but not globally sorted.
    pub fn within_radius(&self, table: &StarTable, center: &Vector3<f64>, radius: f64) -> Vec<usize> {
        let lo = cell_key(&(center - Vector3::repeat(radius)), self.cell_size);
        let hi = cell_key(&(center + Vector3::repeat(radius)), self.cell_size);
        let radius_sq = radius * radius;

        let mut hits = Vec::new();
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    let Some(indices) = self.cells.get(&(cx, cy, cz)) else {
                        continue;
                    };
                    for &index in indices {
                        let star = table
                            .get(index)
                            .expect("grid index out of bounds for table");
                        if (star.position() - center).norm_squared() <= radius_sq {
                            hits.push(index);
                        }
                    }
                }
            }
        }
        hits
    }
}

fn cell_key(position: &Vector3<f64>, cell_size: f64) -> CellKey {
    (
        (position.x / cell_size).floor() as i64,
        (position.y / cell_size).floor() as i64,
        (position.z / cell_size).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::StarRecord;

    fn star_at(x: f64, y: f64, z: f64) -> StarRecord {
        let d = (x * x + y * y + z * z).sqrt();
        StarRecord {
            l: 0.0,
            b: 0.0,
            d,
            x,
            y,
            z,
        }
    }

    #[test]
    fn test_cell_assignment_floor_division() {
        let table = StarTable::from_stars(vec![
            star_at(0.5, 0.5, 0.5),
            star_at(-0.5, 0.5, 0.5),
            star_at(49.9, 0.0, 0.0),
            star_at(50.1, 0.0, 0.0),
        ]);
        let grid = ChunkGrid::build(&table, 50.0);

        assert_eq!(grid.cell_len((0, 0, 0)), 2);
        assert_eq!(grid.cell_len((-1, 0, 0)), 1);
        assert_eq!(grid.cell_len((1, 0, 0)), 1);
        assert_eq!(grid.occupied_cells(), 3);
    }

    #[test]
    fn test_within_radius_matches_brute_force() {
        // Deterministic lattice of stars spread across several cells.
        let mut stars = Vec::new();
        for i in -3i32..=3 {
            for j in -3i32..=3 {
                for k in -3i32..=3 {
                    stars.push(star_at(i as f64 * 7.0, j as f64 * 7.0, k as f64 * 7.0));
                }
            }
        }
        let table = StarTable::from_stars(stars);
        let grid = ChunkGrid::build(&table, 10.0);

        let center = Vector3::new(3.0, -2.0, 5.0);
        let radius = 12.5;

        let mut expected: Vec<usize> = table
            .iter()
            .enumerate()
            .filter(|(_, star)| (star.position() - center).norm() <= radius)
            .map(|(index, _)| index)
            .collect();
        let mut actual = grid.within_radius(&table, &center, radius);

        expected.sort_unstable();
        actual.sort_unstable();
        assert!(!expected.is_empty());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_within_radius_empty_region() {
        let table = StarTable::from_stars(vec![star_at(100.0, 100.0, 100.0)]);
        let grid = ChunkGrid::build(&table, 10.0);
        let hits = grid.within_radius(&table, &Vector3::zeros(), 5.0);
        assert!(hits.is_empty());
    }

    #[test]
    #[should_panic(expected = "cell size must be positive")]
    fn test_zero_cell_size_panics() {
        ChunkGrid::build(&StarTable::default(), 0.0);
    }
}
