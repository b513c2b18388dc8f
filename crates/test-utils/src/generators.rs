//! Coordinate generators for property-style tests and benchmarks.
//!
//! Random generators take an explicit seed so failures are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniformly distributed (longitude, latitude) points inside a bounding box.
///
/// # Arguments
///
/// * `seed` - RNG seed
/// * `count` - Number of points
/// * `bbox` - (min_lon, min_lat, max_lon, max_lat) in degrees
///
/// # Example
///
/// ```
/// use test_utils::random_lonlat_points;
///
/// let points = random_lonlat_points(7, 100, (-10.0, -5.0, 10.0, 5.0));
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|&(lon, lat)| lon.abs() <= 10.0 && lat.abs() <= 5.0));
/// ```
pub fn random_lonlat_points(
    seed: u64,
    count: usize,
    bbox: (f64, f64, f64, f64),
) -> Vec<(f64, f64)> {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                rng.gen_range(min_lon..=max_lon),
                rng.gen_range(min_lat..=max_lat),
            )
        })
        .collect()
}

/// Regular lattice of (longitude, latitude) cell centers, row-major from the
/// south-west corner.
///
/// ```
/// use test_utils::lonlat_lattice;
///
/// let lattice = lonlat_lattice((0.0, 0.0, 10.0, 4.0), 5, 2);
/// assert_eq!(lattice.len(), 10);
/// assert_eq!(lattice[0], (1.0, 1.0));
/// assert_eq!(lattice[9], (9.0, 3.0));
/// ```
pub fn lonlat_lattice(
    bbox: (f64, f64, f64, f64),
    columns: usize,
    rows: usize,
) -> Vec<(f64, f64)> {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let dx = (max_lon - min_lon) / columns as f64;
    let dy = (max_lat - min_lat) / rows as f64;
    let mut points = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            points.push((
                min_lon + (column as f64 + 0.5) * dx,
                min_lat + (row as f64 + 0.5) * dy,
            ));
        }
    }
    points
}

/// Points on one parallel, evenly spaced in longitude over the whole globe
/// (excluding ±180°).
pub fn parallel_points(latitude: f64, count: usize) -> Vec<(f64, f64)> {
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| (-180.0 + (i as f64 + 0.5) * step, latitude))
        .collect()
}
