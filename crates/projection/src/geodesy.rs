//! Ellipsoidal geodesy helpers shared by every projection family.
//!
//! These are the classic conformal/isometric latitude functions:
//! - `msfn`: conformal radius scale factor (Lambert secant constants)
//! - `tsfn`: isometric latitude factor (Lambert, Mercator, polar Stereographic)
//! - `ssfn`: ellipsoidal stereographic substitution (oblique Stereographic)
//! - `qsfn`: authalic latitude helper
//! - `phi2_iterate`: inverse of `tsfn`, solved by fixed-point iteration
//!
//! All angles are radians unless a function name says otherwise.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::warn;

use crate::error::{ProjectionError, ProjectionResult};

/// Branch tolerance (radians) for tangent cones, poles and the equator.
pub const TOLERANCE: f64 = 1e-10;

/// Convergence threshold for `phi2_iterate`.
pub const CONVERGENCE: f64 = 1e-12;

/// Maximum number of `phi2_iterate` steps.
pub const MAXIMUM_ITERATIONS: usize = 15;

/// Distance (degrees) that forward transforms keep from the poles and the
/// ±180° meridian.
pub const NUDGE_DEGREES: f64 = 1e-6;

/// Smallest accepted semiaxis (meters).
pub const MINIMUM_SEMIAXIS: f64 = 1.0;

/// Largest accepted semiaxis (meters).
pub const MAXIMUM_SEMIAXIS: f64 = 1e10;

/// Convert degrees to radians.
#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Convert radians to degrees.
#[inline]
pub fn degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Conformal radius scale factor `cosφ / sqrt(1 − e²·sin²φ)`.
#[inline]
pub fn msfn(sin_phi: f64, cos_phi: f64, es: f64) -> f64 {
    cos_phi / (1.0 - es * sin_phi * sin_phi).sqrt()
}

/// Isometric latitude factor
/// `tan(π/4 − φ/2) / ((1 − e·sinφ)/(1 + e·sinφ))^(e/2)`.
///
/// Returns 0 at the north pole, where `tan(π/4 − φ/2)` vanishes anyway but
/// rounding could leave a tiny negative value.
#[inline]
pub fn tsfn(phi: f64, sin_phi: f64, e: f64) -> f64 {
    if (phi - FRAC_PI_2).abs() < TOLERANCE {
        return 0.0;
    }
    let es = e * sin_phi;
    (FRAC_PI_4 - 0.5 * phi).tan() / ((1.0 - es) / (1.0 + es)).powf(0.5 * e)
}

/// Ellipsoidal stereographic substitution
/// `tan(π/4 + φ/2) · ((1 − e·sinφ)/(1 + e·sinφ))^(e/2)`.
#[inline]
pub fn ssfn(phi: f64, sin_phi: f64, e: f64) -> f64 {
    let es = e * sin_phi;
    (FRAC_PI_4 + 0.5 * phi).tan() * ((1.0 - es) / (1.0 + es)).powf(0.5 * e)
}

/// Authalic latitude helper `q(φ)`. `one_es` is `1 − e²`.
pub fn qsfn(sin_phi: f64, e: f64, one_es: f64) -> f64 {
    if e >= 1e-7 {
        let con = e * sin_phi;
        let div = 1.0 - con * con;
        one_es * (sin_phi / div - (0.5 / e) * ((1.0 - con) / (1.0 + con)).ln())
    } else {
        2.0 * sin_phi
    }
}

/// Latitude from an isometric value `t`, the inverse of `tsfn`.
///
/// Starts at `π/2 − 2·atan(t)` and iterates
/// `φ ← π/2 − 2·atan(t·((1 − e·sinφ)/(1 + e·sinφ))^(e/2))`
/// until successive values agree within `CONVERGENCE`.
pub fn phi2_iterate(t: f64, e: f64) -> ProjectionResult<f64> {
    let half_e = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * t.atan();

    for _ in 0..MAXIMUM_ITERATIONS {
        let es = e * phi.sin();
        let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
        if (next - phi).abs() < CONVERGENCE {
            return Ok(next);
        }
        phi = next;
    }

    warn!(t, e, "Latitude iteration did not converge");
    Err(ProjectionError::NonConvergence {
        iterations: MAXIMUM_ITERATIONS,
    })
}

/// Wrap an angle into [-π, π].
#[inline]
pub fn wrap_radians(mut angle: f64) -> f64 {
    if angle.abs() <= PI {
        return angle;
    }
    angle %= 2.0 * PI;
    if angle > PI {
        angle -= 2.0 * PI;
    } else if angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Normalize a longitude in degrees into [-180, 180].
#[inline]
pub fn normalize_longitude(longitude: f64) -> f64 {
    degrees(wrap_radians(radians(longitude)))
}

/// Move a coordinate away from the poles and the ±180° meridian by
/// `NUDGE_DEGREES` so every forward transform stays finite and invertible.
#[inline]
pub fn nudge_coordinates(longitude: f64, latitude: f64) -> (f64, f64) {
    let max_longitude = 180.0 - NUDGE_DEGREES;
    let max_latitude = 90.0 - NUDGE_DEGREES;
    (
        longitude.clamp(-max_longitude, max_longitude),
        latitude.clamp(-max_latitude, max_latitude),
    )
}

/// Eccentricity of an ellipsoid with the given semiaxes.
#[inline]
pub fn eccentricity(major_semiaxis: f64, minor_semiaxis: f64) -> f64 {
    let ratio = minor_semiaxis / major_semiaxis;
    (1.0 - ratio * ratio).max(0.0).sqrt()
}

/// Both semiaxes finite, within the planetary range, and major ≥ minor.
pub fn is_valid_ellipsoid(major_semiaxis: f64, minor_semiaxis: f64) -> bool {
    let in_range = |axis: f64| {
        axis.is_finite() && (MINIMUM_SEMIAXIS..=MAXIMUM_SEMIAXIS).contains(&axis)
    };
    in_range(major_semiaxis) && in_range(minor_semiaxis) && major_semiaxis >= minor_semiaxis
}

/// Longitude in [-180, 180] degrees.
#[inline]
pub fn is_valid_longitude(longitude: f64) -> bool {
    (-180.0..=180.0).contains(&longitude)
}

/// Latitude in [-90, 90] degrees.
#[inline]
pub fn is_valid_latitude(latitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude)
}

pub fn check_ellipsoid(major_semiaxis: f64, minor_semiaxis: f64) -> ProjectionResult<()> {
    if is_valid_ellipsoid(major_semiaxis, minor_semiaxis) {
        Ok(())
    } else {
        Err(ProjectionError::InvalidEllipsoid {
            major: major_semiaxis,
            minor: minor_semiaxis,
        })
    }
}

pub fn check_longitude(param: &'static str, value: f64) -> ProjectionResult<()> {
    if is_valid_longitude(value) {
        Ok(())
    } else {
        Err(ProjectionError::InvalidLongitude { param, value })
    }
}

pub fn check_latitude(param: &'static str, value: f64) -> ProjectionResult<()> {
    if is_valid_latitude(value) {
        Ok(())
    } else {
        Err(ProjectionError::InvalidLatitude { param, value })
    }
}

pub fn check_false_offset(easting: f64, northing: f64) -> ProjectionResult<()> {
    if easting.is_finite() && northing.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::InvalidFalseOffset { easting, northing })
    }
}

/// Fail with `DegenerateTerm` unless `value` is finite.
pub fn check_finite(name: &'static str, value: f64) -> ProjectionResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::DegenerateTerm(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGS84_E: f64 = 0.081_819_190_842_622;

    #[test]
    fn test_unit_conversion() {
        assert!((radians(180.0) - PI).abs() < 1e-15);
        assert!((degrees(PI) - 180.0).abs() < 1e-12);
        assert!((degrees(radians(-97.25)) - -97.25).abs() < 1e-12);
    }

    #[test]
    fn test_msfn_sphere_is_cosine() {
        let phi = radians(33.0);
        assert!((msfn(phi.sin(), phi.cos(), 0.0) - phi.cos()).abs() < 1e-15);
    }

    #[test]
    fn test_tsfn_and_ssfn_are_reciprocal_on_sphere() {
        for lat in [-80.0, -33.0, 0.0, 12.5, 45.0, 89.0] {
            let phi: f64 = radians(lat);
            let product = tsfn(phi, phi.sin(), 0.0) * ssfn(phi, phi.sin(), 0.0);
            assert!((product - 1.0).abs() < 1e-12, "lat {}: {}", lat, product);
        }
    }

    #[test]
    fn test_tsfn_north_pole_guard() {
        assert_eq!(tsfn(FRAC_PI_2, 1.0, WGS84_E), 0.0);
    }

    #[test]
    fn test_phi2_inverts_tsfn() {
        for e in [0.0, WGS84_E] {
            for lat in [-89.5, -60.0, -1.0, 0.0, 35.9611, 75.0, 89.9] {
                let phi = radians(lat);
                let t = tsfn(phi, phi.sin(), e);
                let back = phi2_iterate(t, e).unwrap();
                assert!(
                    (back - phi).abs() < 1e-11,
                    "e={} lat={}: got {}",
                    e,
                    lat,
                    degrees(back)
                );
            }
        }
    }

    #[test]
    fn test_phi2_non_convergence_is_error() {
        let result = phi2_iterate(f64::NAN, WGS84_E);
        assert!(matches!(
            result,
            Err(ProjectionError::NonConvergence { iterations: 15 })
        ));
    }

    #[test]
    fn test_qsfn_sphere() {
        assert!((qsfn(0.5, 0.0, 1.0) - 1.0).abs() < 1e-15);
        // q(90°) = 1 − (1 − e²)/(2e)·ln((1 − e)/(1 + e))
        let e = WGS84_E;
        let expected = 1.0 - (1.0 - e * e) / (2.0 * e) * ((1.0 - e) / (1.0 + e)).ln();
        assert!((qsfn(1.0, e, 1.0 - e * e) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_radians() {
        assert!((wrap_radians(3.0 * PI / 2.0) - -PI / 2.0).abs() < 1e-12);
        assert!((wrap_radians(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(wrap_radians(1.0), 1.0);
        assert!((wrap_radians(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_longitude() {
        assert!((normalize_longitude(190.0) - -170.0).abs() < 1e-9);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((normalize_longitude(-97.0) - -97.0).abs() < 1e-12);
    }

    #[test]
    fn test_nudge_coordinates() {
        let (lon, lat) = nudge_coordinates(180.0, -90.0);
        assert_eq!(lon, 180.0 - NUDGE_DEGREES);
        assert_eq!(lat, -90.0 + NUDGE_DEGREES);
        assert_eq!(nudge_coordinates(-78.7268, 35.9611), (-78.7268, 35.9611));
    }

    #[test]
    fn test_validators() {
        assert!(is_valid_ellipsoid(6_370_000.0, 6_370_000.0));
        assert!(is_valid_ellipsoid(6_378_137.0, 6_356_752.314_245));
        assert!(!is_valid_ellipsoid(6_356_752.0, 6_378_137.0));
        assert!(!is_valid_ellipsoid(0.0, 0.0));
        assert!(!is_valid_ellipsoid(f64::NAN, 6_370_000.0));
        assert!(!is_valid_ellipsoid(f64::INFINITY, 6_370_000.0));

        assert!(is_valid_longitude(-180.0) && is_valid_longitude(180.0));
        assert!(!is_valid_longitude(180.5) && !is_valid_longitude(f64::NAN));
        assert!(is_valid_latitude(90.0) && !is_valid_latitude(95.0));
    }

    #[test]
    fn test_check_errors_name_parameter() {
        let err = check_latitude("central_latitude", 95.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid latitude for 'central_latitude': 95 (expected [-90, 90])"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_eccentricity() {
        assert_eq!(eccentricity(6_370_000.0, 6_370_000.0), 0.0);
        let e = eccentricity(6_378_137.0, 6_356_752.314_245_179);
        assert!((e - WGS84_E).abs() < 1e-12);
    }
}
