//! Bulk coordinate transforms.
//!
//! Projectors are `Sync`, so the parallel versions share one `&dyn Projector`
//! across rayon workers. Results keep the input order and match the
//! sequential versions exactly.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProjectionResult;
use crate::projector::Projector;

/// Project (longitude, latitude) pairs in degrees to (x, y) meters.
pub fn project_points(projector: &dyn Projector, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&(lon, lat)| projector.project(lon, lat))
        .collect()
}

/// Unproject (x, y) pairs in meters. Stops at the first failure.
pub fn unproject_points(
    projector: &dyn Projector,
    points: &[(f64, f64)],
) -> ProjectionResult<Vec<(f64, f64)>> {
    points
        .iter()
        .map(|&(x, y)| projector.unproject(x, y))
        .collect()
}

/// Parallel [`project_points`].
pub fn par_project_points(projector: &dyn Projector, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .par_iter()
        .map(|&(lon, lat)| projector.project(lon, lat))
        .collect()
}

/// Parallel [`unproject_points`].
pub fn par_unproject_points(
    projector: &dyn Projector,
    points: &[(f64, f64)],
) -> ProjectionResult<Vec<(f64, f64)>> {
    points
        .par_iter()
        .map(|&(x, y)| projector.unproject(x, y))
        .collect()
}

/// Regular lattice of cells in projected space (meters).
///
/// `(west, south)` is the outer corner of cell (0, 0). Rows run south to
/// north, columns west to east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellLattice {
    pub west: f64,
    pub south: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns: usize,
    pub rows: usize,
}

impl CellLattice {
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Projected center of a cell.
    pub fn center(&self, column: usize, row: usize) -> (f64, f64) {
        (
            self.west + (column as f64 + 0.5) * self.cell_width,
            self.south + (row as f64 + 0.5) * self.cell_height,
        )
    }
}

/// Longitude/latitude of every cell center, row-major from the south-west
/// cell. Rows are computed in parallel.
pub fn cell_centers(
    projector: &dyn Projector,
    lattice: &CellLattice,
) -> ProjectionResult<Vec<(f64, f64)>> {
    debug!(
        projection = projector.name(),
        columns = lattice.columns,
        rows = lattice.rows,
        "Computing cell centers"
    );

    if lattice.columns == 0 || lattice.rows == 0 {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<(f64, f64)>> = (0..lattice.rows)
        .into_par_iter()
        .map(|row| {
            (0..lattice.columns)
                .map(|column| {
                    let (x, y) = lattice.center(column, row);
                    projector.unproject(x, y)
                })
                .collect::<ProjectionResult<Vec<_>>>()
        })
        .collect::<ProjectionResult<Vec<_>>>()?;

    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ellipsoid, LambertConformal, Mercator};

    fn lambert() -> LambertConformal {
        LambertConformal::new(Ellipsoid::MODELING_SPHERE, 33.0, 45.0, -97.0, 40.0, 0.0, 0.0)
            .unwrap()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let proj = lambert();
        let points: Vec<(f64, f64)> = (0..500)
            .map(|i| (-130.0 + 0.12 * i as f64, 20.0 + 0.06 * i as f64))
            .collect();

        let sequential = project_points(&proj, &points);
        let parallel = par_project_points(&proj, &points);
        assert_eq!(sequential, parallel);

        let back = par_unproject_points(&proj, &parallel).unwrap();
        assert_eq!(back, unproject_points(&proj, &sequential).unwrap());
        for (&(lon, lat), &(lon2, lat2)) in points.iter().zip(&back) {
            assert!((lon - lon2).abs() < 1e-6 && (lat - lat2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_input() {
        let proj = lambert();
        assert!(project_points(&proj, &[]).is_empty());
        assert!(par_unproject_points(&proj, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_cell_centers_row_major() {
        let proj = Mercator::new(Ellipsoid::MODELING_SPHERE, 0.0, 0.0, 0.0).unwrap();
        let lattice = CellLattice {
            west: -200_000.0,
            south: -100_000.0,
            cell_width: 100_000.0,
            cell_height: 50_000.0,
            columns: 4,
            rows: 3,
        };
        let centers = cell_centers(&proj, &lattice).unwrap();
        assert_eq!(centers.len(), lattice.cell_count());

        // Second cell of the first row sits just west of the central meridian
        let (x, y) = lattice.center(1, 0);
        assert_eq!((x, y), (-50_000.0, -75_000.0));
        let expected = proj.unproject(x, y).unwrap();
        assert_eq!(centers[1], expected);
        assert!(centers[1].0 < 0.0 && centers[1].1 < 0.0);

        // Latitude increases row by row
        assert!(centers[0].1 < centers[lattice.columns].1);
        assert!(centers[lattice.columns].1 < centers[2 * lattice.columns].1);
    }

    #[test]
    fn test_empty_lattice() {
        let proj = lambert();
        let lattice = CellLattice {
            west: 0.0,
            south: 0.0,
            cell_width: 12_000.0,
            cell_height: 12_000.0,
            columns: 0,
            rows: 10,
        };
        assert!(cell_centers(&proj, &lattice).unwrap().is_empty());
    }
}
