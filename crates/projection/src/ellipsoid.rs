//! Planet approximation used by every projector.

use serde::{Deserialize, Serialize};

use crate::error::ProjectionResult;
use crate::geodesy;

/// Reference ellipsoid given by its semiaxes (meters).
///
/// `major_semiaxis == minor_semiaxis` denotes a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    major_semiaxis: f64,
    minor_semiaxis: f64,
}

impl Ellipsoid {
    /// Sphere used by the WRF/CMAQ modeling grids.
    pub const MODELING_SPHERE: Ellipsoid = Ellipsoid {
        major_semiaxis: 6_370_000.0,
        minor_semiaxis: 6_370_000.0,
    };

    /// WGS84 ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        major_semiaxis: 6_378_137.0,
        minor_semiaxis: 6_356_752.314_245_179,
    };

    /// Create a validated ellipsoid.
    pub fn new(major_semiaxis: f64, minor_semiaxis: f64) -> ProjectionResult<Self> {
        geodesy::check_ellipsoid(major_semiaxis, minor_semiaxis)?;
        Ok(Self {
            major_semiaxis,
            minor_semiaxis,
        })
    }

    /// Create a validated sphere.
    pub fn sphere(radius: f64) -> ProjectionResult<Self> {
        Self::new(radius, radius)
    }

    pub fn major_semiaxis(&self) -> f64 {
        self.major_semiaxis
    }

    pub fn minor_semiaxis(&self) -> f64 {
        self.minor_semiaxis
    }

    pub fn is_sphere(&self) -> bool {
        self.major_semiaxis == self.minor_semiaxis
    }

    /// First eccentricity, 0 for a sphere.
    pub fn eccentricity(&self) -> f64 {
        geodesy::eccentricity(self.major_semiaxis, self.minor_semiaxis)
    }

    /// First eccentricity squared.
    pub fn eccentricity_squared(&self) -> f64 {
        let e = self.eccentricity();
        e * e
    }

    pub fn is_valid(&self) -> bool {
        geodesy::is_valid_ellipsoid(self.major_semiaxis, self.minor_semiaxis)
    }

    /// Both semiaxes agree within `tolerance` meters.
    pub fn approx_eq(&self, other: &Ellipsoid, tolerance: f64) -> bool {
        (self.major_semiaxis - other.major_semiaxis).abs() <= tolerance
            && (self.minor_semiaxis - other.minor_semiaxis).abs() <= tolerance
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::MODELING_SPHERE
    }
}
