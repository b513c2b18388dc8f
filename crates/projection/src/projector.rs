//! Uniform projector contract.
//!
//! Grid construction and per-cell coordinate computation are written once
//! against `dyn Projector` and never name a concrete family.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjectionResult;

/// Absolute tolerance used by `Projector::equals`.
pub const EQUALITY_TOLERANCE: f64 = 1e-6;

/// Projection family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Lambert,
    Mercator,
    Stereographic,
}

impl ProjectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectionKind::Lambert => "Lambert",
            ProjectionKind::Mercator => "Mercator",
            ProjectionKind::Stereographic => "Stereographic",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Family-specific user parameters (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "projection", rename_all = "lowercase")]
pub enum ProjectionParameters {
    Lambert {
        lower_latitude: f64,
        upper_latitude: f64,
        central_longitude: f64,
        central_latitude: f64,
    },
    Mercator {
        central_longitude: f64,
    },
    Stereographic {
        central_longitude: f64,
        central_latitude: f64,
        secant_latitude: f64,
    },
}

impl ProjectionParameters {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            ProjectionParameters::Lambert { .. } => ProjectionKind::Lambert,
            ProjectionParameters::Mercator { .. } => ProjectionKind::Mercator,
            ProjectionParameters::Stereographic { .. } => ProjectionKind::Stereographic,
        }
    }

    /// Same family and every value within `tolerance`.
    pub fn approx_eq(&self, other: &ProjectionParameters, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
        match (self, other) {
            (
                ProjectionParameters::Lambert {
                    lower_latitude: l1,
                    upper_latitude: u1,
                    central_longitude: lon1,
                    central_latitude: lat1,
                },
                ProjectionParameters::Lambert {
                    lower_latitude: l2,
                    upper_latitude: u2,
                    central_longitude: lon2,
                    central_latitude: lat2,
                },
            ) => close(*l1, *l2) && close(*u1, *u2) && close(*lon1, *lon2) && close(*lat1, *lat2),
            (
                ProjectionParameters::Mercator {
                    central_longitude: lon1,
                },
                ProjectionParameters::Mercator {
                    central_longitude: lon2,
                },
            ) => close(*lon1, *lon2),
            (
                ProjectionParameters::Stereographic {
                    central_longitude: lon1,
                    central_latitude: lat1,
                    secant_latitude: s1,
                },
                ProjectionParameters::Stereographic {
                    central_longitude: lon2,
                    central_latitude: lat2,
                    secant_latitude: s2,
                },
            ) => close(*lon1, *lon2) && close(*lat1, *lat2) && close(*s1, *s2),
            _ => false,
        }
    }
}

/// Forward/inverse transform between longitude/latitude (degrees) and
/// projected x/y (meters).
///
/// `project`/`unproject` take `&self` and only read derived state, so a
/// projector can be shared across threads. The setters take `&mut self` and
/// replace every derived term before returning.
pub trait Projector: fmt::Debug + Send + Sync {
    fn kind(&self) -> ProjectionKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn ellipsoid(&self) -> Ellipsoid;

    fn false_easting(&self) -> f64;

    fn false_northing(&self) -> f64;

    fn central_longitude(&self) -> f64;

    fn central_latitude(&self) -> f64;

    fn parameters(&self) -> ProjectionParameters;

    /// Re-check every construction invariant, including derived terms.
    fn is_valid(&self) -> bool;

    /// Project (longitude, latitude) in degrees to (x, y) in meters.
    ///
    /// Points on the poles or the ±180° meridian are nudged inward, so the
    /// result is always finite.
    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64);

    /// Unproject (x, y) in meters to (longitude, latitude) in degrees, with
    /// longitude in [-180, 180].
    fn unproject(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)>;

    /// Replace the ellipsoid and recompute every derived term.
    fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) -> ProjectionResult<()>;

    fn set_false_easting_northing(&mut self, easting: f64, northing: f64)
        -> ProjectionResult<()>;

    /// Deep copy behind a fresh box.
    fn box_clone(&self) -> Box<dyn Projector>;

    /// Same family and every parameter and offset within `EQUALITY_TOLERANCE`.
    fn equals(&self, other: &dyn Projector) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= EQUALITY_TOLERANCE;
        self.kind() == other.kind()
            && self
                .ellipsoid()
                .approx_eq(&other.ellipsoid(), EQUALITY_TOLERANCE)
            && close(self.false_easting(), other.false_easting())
            && close(self.false_northing(), other.false_northing())
            && self
                .parameters()
                .approx_eq(&other.parameters(), EQUALITY_TOLERANCE)
    }
}

impl Clone for Box<dyn Projector> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Build a boxed projector from parameters, an ellipsoid, and false offsets.
pub fn build_projector(
    parameters: ProjectionParameters,
    ellipsoid: Ellipsoid,
    false_easting: f64,
    false_northing: f64,
) -> ProjectionResult<Box<dyn Projector>> {
    use crate::{LambertConformal, Mercator, Stereographic};

    let projector: Box<dyn Projector> = match parameters {
        ProjectionParameters::Lambert {
            lower_latitude,
            upper_latitude,
            central_longitude,
            central_latitude,
        } => Box::new(LambertConformal::new(
            ellipsoid,
            lower_latitude,
            upper_latitude,
            central_longitude,
            central_latitude,
            false_easting,
            false_northing,
        )?),
        ProjectionParameters::Mercator { central_longitude } => Box::new(Mercator::new(
            ellipsoid,
            central_longitude,
            false_easting,
            false_northing,
        )?),
        ProjectionParameters::Stereographic {
            central_longitude,
            central_latitude,
            secant_latitude,
        } => Box::new(Stereographic::new(
            ellipsoid,
            central_longitude,
            central_latitude,
            secant_latitude,
            false_easting,
            false_northing,
        )?),
    };
    Ok(projector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_approx_eq() {
        let a = ProjectionParameters::Mercator {
            central_longitude: -100.0,
        };
        let b = ProjectionParameters::Mercator {
            central_longitude: -100.0 + 1e-9,
        };
        let c = ProjectionParameters::Stereographic {
            central_longitude: -100.0,
            central_latitude: 90.0,
            secant_latitude: 45.0,
        };
        assert!(a.approx_eq(&b, EQUALITY_TOLERANCE));
        assert!(!a.approx_eq(&c, EQUALITY_TOLERANCE));
        assert_eq!(c.kind(), ProjectionKind::Stereographic);
    }

    #[test]
    fn test_parameters_serde_tagging() {
        let parameters = ProjectionParameters::Lambert {
            lower_latitude: 33.0,
            upper_latitude: 45.0,
            central_longitude: -97.0,
            central_latitude: 40.0,
        };
        let json = serde_json::to_string(&parameters).unwrap();
        assert!(json.contains("\"projection\":\"lambert\""), "{}", json);
        let back: ProjectionParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parameters);
    }

    #[test]
    fn test_build_projector_dispatches_by_family() {
        let projector = build_projector(
            ProjectionParameters::Mercator {
                central_longitude: -100.0,
            },
            Ellipsoid::MODELING_SPHERE,
            0.0,
            0.0,
        )
        .unwrap();
        assert_eq!(projector.kind(), ProjectionKind::Mercator);
        assert_eq!(projector.name(), "Mercator");
    }
}
