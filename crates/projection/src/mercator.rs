//! Mercator projection (normal aspect, central latitude 0).
//!
//!   forward: x = a·(λ − λ₀), y = a·(−ln tsfn(φ, e))   [sphere: a·ln tan(π/4 + φ/2)]
//!   inverse: λ = λ₀ + x/a,   φ = phi2(exp(−y/a), e)    [sphere: π/2 − 2·atan(exp(−y/a))]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use tracing::debug;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjectionResult;
use crate::geodesy;
use crate::projector::{ProjectionKind, ProjectionParameters, Projector};

/// Mercator projector.
#[derive(Debug, Clone)]
pub struct Mercator {
    ellipsoid: Ellipsoid,
    central_longitude: f64,
    false_easting: f64,
    false_northing: f64,
    terms: MercatorTerms,
}

#[derive(Debug, Clone, Copy)]
struct MercatorTerms {
    e: f64,
    lambda0: f64,
}

impl MercatorTerms {
    fn compute(ellipsoid: &Ellipsoid, central_longitude: f64) -> ProjectionResult<Self> {
        Ok(Self {
            e: geodesy::check_finite("e", ellipsoid.eccentricity())?,
            lambda0: geodesy::radians(central_longitude),
        })
    }
}

impl Mercator {
    /// Create a Mercator projector centered on `central_longitude` (degrees).
    pub fn new(
        ellipsoid: Ellipsoid,
        central_longitude: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> ProjectionResult<Self> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        geodesy::check_longitude("central_longitude", central_longitude)?;
        geodesy::check_false_offset(false_easting, false_northing)?;

        let terms = MercatorTerms::compute(&ellipsoid, central_longitude)?;
        debug!(central_longitude, e = terms.e, "Created Mercator projector");

        Ok(Self {
            ellipsoid,
            central_longitude,
            false_easting,
            false_northing,
            terms,
        })
    }
}

impl Projector for Mercator {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Mercator
    }

    fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    fn false_easting(&self) -> f64 {
        self.false_easting
    }

    fn false_northing(&self) -> f64 {
        self.false_northing
    }

    fn central_longitude(&self) -> f64 {
        self.central_longitude
    }

    fn central_latitude(&self) -> f64 {
        0.0
    }

    fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters::Mercator {
            central_longitude: self.central_longitude,
        }
    }

    fn is_valid(&self) -> bool {
        self.ellipsoid.is_valid()
            && geodesy::is_valid_longitude(self.central_longitude)
            && self.false_easting.is_finite()
            && self.false_northing.is_finite()
            && self.terms.e.is_finite()
            && self.terms.lambda0.is_finite()
    }

    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        debug_assert!(self.is_valid());
        let (longitude, latitude) = geodesy::nudge_coordinates(longitude, latitude);
        let phi = geodesy::radians(latitude);
        let lambda = geodesy::wrap_radians(geodesy::radians(longitude) - self.terms.lambda0);
        let a = self.ellipsoid.major_semiaxis();

        let y = if self.terms.e == 0.0 {
            (FRAC_PI_4 + 0.5 * phi).tan().ln()
        } else {
            -geodesy::tsfn(phi, phi.sin(), self.terms.e).ln()
        };

        (lambda * a + self.false_easting, y * a + self.false_northing)
    }

    fn unproject(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        debug_assert!(self.is_valid());
        let a = self.ellipsoid.major_semiaxis();
        let t = (-(y - self.false_northing) / a).exp();

        let phi = if self.terms.e == 0.0 {
            FRAC_PI_2 - 2.0 * t.atan()
        } else {
            geodesy::phi2_iterate(t, self.terms.e)?
        };
        let lambda = (x - self.false_easting) / a + self.terms.lambda0;

        Ok((
            geodesy::normalize_longitude(geodesy::degrees(lambda)),
            geodesy::degrees(phi),
        ))
    }

    fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) -> ProjectionResult<()> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        let terms = MercatorTerms::compute(&ellipsoid, self.central_longitude)?;
        debug!(
            major_semiaxis = ellipsoid.major_semiaxis(),
            minor_semiaxis = ellipsoid.minor_semiaxis(),
            "Updated Mercator ellipsoid"
        );
        self.ellipsoid = ellipsoid;
        self.terms = terms;
        Ok(())
    }

    fn set_false_easting_northing(&mut self, easting: f64, northing: f64) -> ProjectionResult<()> {
        geodesy::check_false_offset(easting, northing)?;
        self.false_easting = easting;
        self.false_northing = northing;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Projector> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point() {
        let proj = Mercator::new(Ellipsoid::MODELING_SPHERE, -100.0, 0.0, 0.0).unwrap();
        let (x, y) = proj.project(-78.7268, 35.9611);
        assert!((x - 2_365_100.626).abs() < 1.0, "x = {}", x);
        assert!((y - 4_289_790.359).abs() < 1.0, "y = {}", y);
    }

    #[test]
    fn test_origin() {
        let proj = Mercator::new(Ellipsoid::WGS84, 0.0, 0.0, 0.0).unwrap();
        let (x, y) = proj.project(0.0, 0.0);
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
    }

    #[test]
    fn test_sphere_and_ellipsoid_roundtrip() {
        for ellipsoid in [Ellipsoid::MODELING_SPHERE, Ellipsoid::WGS84] {
            let proj = Mercator::new(ellipsoid, -100.0, 1_000.0, -2_000.0).unwrap();
            for (lon, lat) in [(-78.7268, 35.9611), (139.69, 35.69), (0.0, -60.0), (79.0, 84.0)] {
                let (x, y) = proj.project(lon, lat);
                let (lon2, lat2) = proj.unproject(x, y).unwrap();
                assert!((lon - lon2).abs() < 1e-6, "lon {} vs {}", lon, lon2);
                assert!((lat - lat2).abs() < 1e-6, "lat {} vs {}", lat, lat2);
            }
        }
    }

    #[test]
    fn test_ellipsoid_shrinks_northing() {
        let sphere = Mercator::new(Ellipsoid::sphere(6_378_137.0).unwrap(), 0.0, 0.0, 0.0).unwrap();
        let wgs84 = Mercator::new(Ellipsoid::WGS84, 0.0, 0.0, 0.0).unwrap();
        let (_, y_sphere) = sphere.project(0.0, 60.0);
        let (_, y_wgs84) = wgs84.project(0.0, 60.0);
        // Ellipsoidal isometric latitude is smaller than the spherical one
        assert!(y_wgs84 < y_sphere);
    }

    #[test]
    fn test_poles_and_dateline_are_finite() {
        let proj = Mercator::new(Ellipsoid::WGS84, 170.0, 0.0, 0.0).unwrap();
        for (lon, lat) in [(0.0, 90.0), (0.0, -90.0), (180.0, 0.0), (-180.0, 0.0)] {
            let (x, y) = proj.project(lon, lat);
            assert!(x.is_finite() && y.is_finite(), "({}, {}) -> ({}, {})", lon, lat, x, y);
        }
        // Crossing the dateline east of the central meridian wraps around
        let (x, _) = proj.project(-170.0, 0.0);
        assert!(x > 0.0, "x = {}", x);
    }

    #[test]
    fn test_central_latitude_is_zero() {
        let proj = Mercator::new(Ellipsoid::MODELING_SPHERE, -97.0, 0.0, 0.0).unwrap();
        assert_eq!(proj.central_latitude(), 0.0);
        assert_eq!(proj.name(), "Mercator");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Mercator::new(Ellipsoid::MODELING_SPHERE, 181.0, 0.0, 0.0).is_err());
        assert!(Mercator::new(Ellipsoid::MODELING_SPHERE, -97.0, f64::INFINITY, 0.0).is_err());
    }
}
