//! Reference values and round-trip accuracy for every family.

use projection::{Ellipsoid, LambertConformal, Mercator, Projector, Stereographic};
use test_utils::fixtures::{bbox, ellipsoids, points};
use test_utils::{assert_close, assert_pair_close, random_lonlat_points};

fn ellipsoid(axes: (f64, f64)) -> Ellipsoid {
    Ellipsoid::new(axes.0, axes.1).unwrap()
}

fn conus_lambert(axes: (f64, f64)) -> LambertConformal {
    LambertConformal::new(ellipsoid(axes), 33.0, 45.0, -97.0, 40.0, 0.0, 0.0).unwrap()
}

fn assert_roundtrip(projector: &dyn Projector, samples: &[(f64, f64)]) {
    for &(lon, lat) in samples {
        let (x, y) = projector.project(lon, lat);
        let (lon2, lat2) = projector.unproject(x, y).unwrap();
        assert_close!(lon2, lon, 1e-6, "{} longitude of ({}, {})", projector.name(), lon, lat);
        assert_close!(lat2, lat, 1e-6, "{} latitude of ({}, {})", projector.name(), lon, lat);
    }
}

#[test]
fn test_lambert_reference_point() {
    let proj = conus_lambert(ellipsoids::MODELING_SPHERE);
    let (lon, lat) = points::RTP;
    assert_pair_close!(proj.project(lon, lat), points::RTP_LCC_CONUS, 1.0);
    assert_pair_close!(proj.unproject(points::RTP_LCC_CONUS.0, points::RTP_LCC_CONUS.1).unwrap(), points::RTP, 1e-5);
}

#[test]
fn test_mercator_reference_point() {
    let proj = Mercator::new(ellipsoid(ellipsoids::MODELING_SPHERE), -100.0, 0.0, 0.0).unwrap();
    let (lon, lat) = points::RTP;
    assert_pair_close!(proj.project(lon, lat), points::RTP_MERCATOR_LON_100, 1.0);
}

#[test]
fn test_lambert_roundtrip_conus() {
    let samples = random_lonlat_points(1, 200, bbox::CONUS);
    for axes in ellipsoids::ALL {
        assert_roundtrip(&conus_lambert(axes), &samples);
        assert_roundtrip(&conus_lambert(axes), &points::CONUS);
    }
}

#[test]
fn test_lambert_southern_hemisphere_roundtrip() {
    let samples = random_lonlat_points(2, 200, (110.0, -45.0, 155.0, -10.0));
    for axes in ellipsoids::ALL {
        let proj =
            LambertConformal::new(ellipsoid(axes), -36.0, -18.0, 134.0, -27.0, 0.0, 0.0).unwrap();
        assert!(proj.cone_constant() < 0.0);
        assert_roundtrip(&proj, &samples);
    }
}

#[test]
fn test_mercator_roundtrip_global() {
    let samples = random_lonlat_points(3, 500, (-179.0, -85.0, 179.0, 85.0));
    for axes in ellipsoids::ALL {
        let proj = Mercator::new(ellipsoid(axes), 0.0, 0.0, 0.0).unwrap();
        assert_roundtrip(&proj, &samples);
    }
}

#[test]
fn test_stereographic_roundtrip_every_subtype() {
    let north = random_lonlat_points(4, 200, (-179.0, 20.0, 179.0, 89.0));
    let south = random_lonlat_points(5, 200, (-179.0, -89.0, 179.0, -20.0));
    let regional = random_lonlat_points(6, 200, bbox::EUROPE);

    for axes in ellipsoids::ALL {
        let e = ellipsoid(axes);
        for secant in [60.0, 90.0] {
            let proj = Stereographic::new(e, -98.0, 90.0, secant, 0.0, 0.0).unwrap();
            assert_roundtrip(&proj, &north);
            assert_roundtrip(&proj, &points::ARCTIC);

            let proj = Stereographic::new(e, 0.0, -90.0, -secant, 0.0, 0.0).unwrap();
            assert_roundtrip(&proj, &south);
            assert_roundtrip(&proj, &points::ANTARCTIC);
        }
        let oblique = Stereographic::new(e, 15.0, 52.0, 52.0, 0.0, 0.0).unwrap();
        assert_roundtrip(&oblique, &regional);
        let equatorial = Stereographic::new(e, 15.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_roundtrip(&equatorial, &regional);
    }
}

#[test]
fn test_degenerate_points_are_finite() {
    let sphere = ellipsoid(ellipsoids::MODELING_SPHERE);
    let projectors: Vec<Box<dyn Projector>> = vec![
        Box::new(conus_lambert(ellipsoids::WGS84)),
        Box::new(Mercator::new(sphere, -97.0, 0.0, 0.0).unwrap()),
        Box::new(Stereographic::new(sphere, -98.0, 90.0, 45.0, 0.0, 0.0).unwrap()),
        Box::new(Stereographic::new(Ellipsoid::WGS84, -98.0, -90.0, -71.0, 0.0, 0.0).unwrap()),
        Box::new(Stereographic::new(sphere, -98.0, 30.0, 30.0, 0.0, 0.0).unwrap()),
    ];
    for projector in &projectors {
        for &(lon, lat) in &points::DEGENERATE {
            let (x, y) = projector.project(lon, lat);
            assert!(
                x.is_finite() && y.is_finite(),
                "{} ({}, {}) -> ({}, {})",
                projector.name(),
                lon,
                lat,
                x,
                y
            );
        }
    }
}

#[test]
fn test_forward_is_deterministic_near_dateline() {
    let proj = Mercator::new(Ellipsoid::WGS84, 0.0, 0.0, 0.0).unwrap();
    let east = proj.project(180.0, 10.0);
    let west = proj.project(-180.0, 10.0);
    // Both sides are nudged inward, so they land on opposite map edges
    assert!(east.0 > 0.0 && west.0 < 0.0);
    assert_close!(east.0, -west.0, 1e-6);
    assert_eq!(proj.project(180.0, 10.0), east);
}

#[test]
fn test_lambert_secant_converges_to_tangent() {
    let tangent = LambertConformal::new(Ellipsoid::WGS84, 40.0, 40.0, -97.0, 40.0, 0.0, 0.0)
        .unwrap()
        .cone_constant();
    assert_close!(tangent, 40.0_f64.to_radians().sin(), 1e-15);

    for gap in [1e-3, 1e-5, 1e-7] {
        let secant =
            LambertConformal::new(Ellipsoid::WGS84, 40.0, 40.0 + gap, -97.0, 40.0, 0.0, 0.0)
                .unwrap()
                .cone_constant();
        assert_close!(secant, tangent, 1e-8_f64.max(gap * 0.02), "gap {}", gap);
    }
}
