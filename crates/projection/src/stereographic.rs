//! Stereographic projection in polar, equatorial and oblique aspects.
//!
//! The aspect (subtype) follows from the central latitude:
//! - `NorthPole` / `SouthPole`: central latitude at ±90°, scaled to be true
//!   at the secant latitude (polar stereographic grids)
//! - `Equatorial`: central latitude 0°
//! - `Oblique`: anything else
//!
//! Each aspect has a sphere and an ellipsoid formula, eight variants in all.
//! The ellipsoid forms work on the conformal sphere (`ssfn`) and invert with
//! `phi2_iterate`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjectionResult;
use crate::geodesy::{self, TOLERANCE};
use crate::projector::{ProjectionKind, ProjectionParameters, Projector};

/// Stereographic aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StereographicSubtype {
    NorthPole,
    SouthPole,
    Equatorial,
    Oblique,
}

impl StereographicSubtype {
    /// Aspect for a central latitude in radians.
    pub fn from_central_latitude(phi0: f64) -> Self {
        let abs_phi0 = phi0.abs();
        if (abs_phi0 - FRAC_PI_2).abs() < TOLERANCE {
            if phi0 < 0.0 {
                StereographicSubtype::SouthPole
            } else {
                StereographicSubtype::NorthPole
            }
        } else if abs_phi0 > TOLERANCE {
            StereographicSubtype::Oblique
        } else {
            StereographicSubtype::Equatorial
        }
    }

    pub fn is_polar(&self) -> bool {
        matches!(
            self,
            StereographicSubtype::NorthPole | StereographicSubtype::SouthPole
        )
    }
}

/// Stereographic projector.
#[derive(Debug, Clone)]
pub struct Stereographic {
    ellipsoid: Ellipsoid,
    /// Central meridian (degrees)
    central_longitude: f64,
    /// Latitude of the projection center (degrees)
    central_latitude: f64,
    /// Latitude of true scale for the polar aspects (degrees)
    secant_latitude: f64,
    false_easting: f64,
    false_northing: f64,
    terms: StereographicTerms,
}

/// Terms derived from the user parameters. Always replaced as a whole.
#[derive(Debug, Clone, Copy)]
struct StereographicTerms {
    e: f64,
    lambda0: f64,
    phi0: f64,
    subtype: StereographicSubtype,
    /// sin/cos of the (conformal) central latitude, oblique/equatorial only
    sin_x1: f64,
    cos_x1: f64,
    /// Scale constant
    akm1: f64,
    /// Projection of the center point (meters), removed from every output
    center_x: f64,
    center_y: f64,
}

impl StereographicTerms {
    /// Constants for every aspect, except the projected center.
    fn compute(
        ellipsoid: &Ellipsoid,
        central_longitude: f64,
        central_latitude: f64,
        secant_latitude: f64,
    ) -> ProjectionResult<Self> {
        let e = ellipsoid.eccentricity();
        let phi0 = geodesy::radians(central_latitude);
        let phits = geodesy::radians(secant_latitude).abs();
        let subtype = StereographicSubtype::from_central_latitude(phi0);
        let secant_at_pole = (phits - FRAC_PI_2).abs() < TOLERANCE;

        let (akm1, sin_x1, cos_x1) = if e != 0.0 {
            if subtype.is_polar() {
                let akm1 = if secant_at_pole {
                    2.0 / ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt()
                } else {
                    let (sin_ts, cos_ts) = phits.sin_cos();
                    geodesy::msfn(sin_ts, cos_ts, e * e) / geodesy::tsfn(phits, sin_ts, e)
                };
                (akm1, 0.0, 1.0)
            } else {
                let (sin_phi0, cos_phi0) = phi0.sin_cos();
                let x1 = 2.0 * geodesy::ssfn(phi0, sin_phi0, e).atan() - FRAC_PI_2;
                let akm1 = 2.0 * geodesy::msfn(sin_phi0, cos_phi0, e * e);
                (akm1, x1.sin(), x1.cos())
            }
        } else if subtype.is_polar() {
            let akm1 = if secant_at_pole {
                2.0
            } else {
                phits.cos() / (FRAC_PI_4 - 0.5 * phits).tan()
            };
            (akm1, 0.0, 1.0)
        } else {
            (2.0, phi0.sin(), phi0.cos())
        };

        Ok(Self {
            e,
            lambda0: geodesy::radians(central_longitude),
            phi0,
            subtype,
            sin_x1,
            cos_x1,
            akm1: geodesy::check_finite("akm1", akm1)?,
            center_x: 0.0,
            center_y: 0.0,
        })
    }

    fn all_finite(&self) -> bool {
        [
            self.e,
            self.lambda0,
            self.phi0,
            self.sin_x1,
            self.cos_x1,
            self.akm1,
            self.center_x,
            self.center_y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl Stereographic {
    /// Create a new Stereographic projector.
    ///
    /// # Arguments
    /// * `ellipsoid` - Planet approximation
    /// * `central_longitude` - Central meridian (degrees)
    /// * `central_latitude` - Latitude of the center, selects the aspect (degrees)
    /// * `secant_latitude` - Latitude of true scale for polar aspects (degrees)
    /// * `false_easting` - Added to every projected x (meters)
    /// * `false_northing` - Added to every projected y (meters)
    pub fn new(
        ellipsoid: Ellipsoid,
        central_longitude: f64,
        central_latitude: f64,
        secant_latitude: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> ProjectionResult<Self> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        geodesy::check_longitude("central_longitude", central_longitude)?;
        geodesy::check_latitude("central_latitude", central_latitude)?;
        geodesy::check_latitude("secant_latitude", secant_latitude)?;
        geodesy::check_false_offset(false_easting, false_northing)?;

        let terms = StereographicTerms::compute(
            &ellipsoid,
            central_longitude,
            central_latitude,
            secant_latitude,
        )?;

        let mut projector = Self {
            ellipsoid,
            central_longitude,
            central_latitude,
            secant_latitude,
            false_easting,
            false_northing,
            terms,
        };
        projector.locate_center()?;

        debug!(
            central_longitude,
            central_latitude,
            secant_latitude,
            subtype = ?projector.terms.subtype,
            "Created Stereographic projector"
        );
        Ok(projector)
    }

    /// Project the center point through the freshly derived terms and keep
    /// the result as the origin of the output plane.
    ///
    /// Must run after every other term is in place.
    fn locate_center(&mut self) -> ProjectionResult<()> {
        self.terms.center_x = 0.0;
        self.terms.center_y = 0.0;
        let (x, y) = self.project(self.central_longitude, self.central_latitude);
        self.terms.center_x = geodesy::check_finite("center_x", x - self.false_easting)?;
        self.terms.center_y = geodesy::check_finite("center_y", y - self.false_northing)?;
        Ok(())
    }

    pub fn secant_latitude(&self) -> f64 {
        self.secant_latitude
    }

    pub fn subtype(&self) -> StereographicSubtype {
        self.terms.subtype
    }

    /// Projected center (meters) before false offsets are applied.
    pub fn projected_center(&self) -> (f64, f64) {
        (self.terms.center_x, self.terms.center_y)
    }

    /// Ellipsoid forward, in semiaxis units.
    fn forward_ellipsoid(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let t = &self.terms;
        let (sin_lambda, mut cos_lambda) = lambda.sin_cos();
        let mut sin_phi = phi.sin();

        let (x, y) = match t.subtype {
            StereographicSubtype::Oblique | StereographicSubtype::Equatorial => {
                let chi = 2.0 * geodesy::ssfn(phi, sin_phi, t.e).atan() - FRAC_PI_2;
                let (sin_chi, cos_chi) = chi.sin_cos();
                if t.subtype == StereographicSubtype::Oblique {
                    let denominator =
                        t.cos_x1 * (1.0 + t.sin_x1 * sin_chi + t.cos_x1 * cos_chi * cos_lambda);
                    let a = t.akm1 / denominator.max(TOLERANCE);
                    (
                        a * cos_chi,
                        a * (t.cos_x1 * sin_chi - t.sin_x1 * cos_chi * cos_lambda),
                    )
                } else {
                    let a = t.akm1 / (1.0 + cos_chi * cos_lambda).max(TOLERANCE);
                    (a * cos_chi, a * sin_chi)
                }
            }
            StereographicSubtype::NorthPole | StereographicSubtype::SouthPole => {
                let mut phi = phi;
                if t.subtype == StereographicSubtype::SouthPole {
                    phi = -phi;
                    cos_lambda = -cos_lambda;
                    sin_phi = -sin_phi;
                }
                let rho = t.akm1 * geodesy::tsfn(phi, sin_phi, t.e);
                (rho, -rho * cos_lambda)
            }
        };
        (x * sin_lambda, y)
    }

    /// Sphere forward, in radius units.
    fn forward_sphere(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let t = &self.terms;
        let (sin_lambda, mut cos_lambda) = lambda.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();

        match t.subtype {
            StereographicSubtype::Equatorial => {
                let a = t.akm1 / (1.0 + cos_phi * cos_lambda).max(TOLERANCE);
                (a * cos_phi * sin_lambda, a * sin_phi)
            }
            StereographicSubtype::Oblique => {
                let denominator = 1.0 + t.sin_x1 * sin_phi + t.cos_x1 * cos_phi * cos_lambda;
                let a = t.akm1 / denominator.max(TOLERANCE);
                (
                    a * cos_phi * sin_lambda,
                    a * (t.cos_x1 * sin_phi - t.sin_x1 * cos_phi * cos_lambda),
                )
            }
            StereographicSubtype::NorthPole | StereographicSubtype::SouthPole => {
                let mut phi = phi;
                if t.subtype == StereographicSubtype::NorthPole {
                    cos_lambda = -cos_lambda;
                    phi = -phi;
                }
                let rho = t.akm1 * (FRAC_PI_4 + 0.5 * phi).tan();
                (rho * sin_lambda, rho * cos_lambda)
            }
        }
    }

    /// Ellipsoid inverse from semiaxis units to (λ − λ₀, φ).
    fn inverse_ellipsoid(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        let t = &self.terms;
        let rho = x.hypot(y);

        let (xp, yp, phi) = match t.subtype {
            StereographicSubtype::Oblique | StereographicSubtype::Equatorial => {
                let c = 2.0 * (rho * t.cos_x1).atan2(t.akm1);
                let (sin_c, cos_c) = c.sin_cos();
                let chi = if rho == 0.0 {
                    (cos_c * t.sin_x1).asin()
                } else {
                    (cos_c * t.sin_x1 + y * sin_c * t.cos_x1 / rho).asin()
                };
                let phi = geodesy::phi2_iterate((FRAC_PI_4 - 0.5 * chi).tan(), t.e)?;
                (
                    x * sin_c,
                    rho * t.cos_x1 * cos_c - y * t.sin_x1 * sin_c,
                    phi,
                )
            }
            StereographicSubtype::NorthPole => {
                let phi = geodesy::phi2_iterate(rho / t.akm1, t.e)?;
                (x, -y, phi)
            }
            StereographicSubtype::SouthPole => {
                let phi = geodesy::phi2_iterate(rho / t.akm1, t.e)?;
                (x, y, -phi)
            }
        };

        let lambda = if xp == 0.0 && yp == 0.0 {
            0.0
        } else {
            xp.atan2(yp)
        };
        Ok((lambda, phi))
    }

    /// Sphere inverse from radius units to (λ − λ₀, φ).
    fn inverse_sphere(&self, x: f64, y: f64) -> (f64, f64) {
        let t = &self.terms;
        let rho = x.hypot(y);
        let c = 2.0 * (rho / t.akm1).atan();
        let (sin_c, cos_c) = c.sin_cos();

        match t.subtype {
            StereographicSubtype::Equatorial => {
                let phi = if rho <= TOLERANCE {
                    0.0
                } else {
                    (y * sin_c / rho).asin()
                };
                let lambda = if cos_c != 0.0 || x != 0.0 {
                    (x * sin_c).atan2(cos_c * rho)
                } else {
                    0.0
                };
                (lambda, phi)
            }
            StereographicSubtype::Oblique => {
                let phi = if rho <= TOLERANCE {
                    t.phi0
                } else {
                    (cos_c * t.sin_x1 + y * sin_c * t.cos_x1 / rho).asin()
                };
                let k = cos_c - t.sin_x1 * phi.sin();
                let lambda = if k != 0.0 || x != 0.0 {
                    (x * sin_c * t.cos_x1).atan2(k * rho)
                } else {
                    0.0
                };
                (lambda, phi)
            }
            StereographicSubtype::NorthPole | StereographicSubtype::SouthPole => {
                let north = t.subtype == StereographicSubtype::NorthPole;
                let y = if north { -y } else { y };
                let phi = if rho <= TOLERANCE {
                    t.phi0
                } else if north {
                    cos_c.asin()
                } else {
                    (-cos_c).asin()
                };
                let lambda = if x == 0.0 && y == 0.0 { 0.0 } else { x.atan2(y) };
                (lambda, phi)
            }
        }
    }
}

impl Projector for Stereographic {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Stereographic
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
        self.central_latitude
    }

    fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters::Stereographic {
            central_longitude: self.central_longitude,
            central_latitude: self.central_latitude,
            secant_latitude: self.secant_latitude,
        }
    }

    fn is_valid(&self) -> bool {
        self.ellipsoid.is_valid()
            && geodesy::is_valid_longitude(self.central_longitude)
            && geodesy::is_valid_latitude(self.central_latitude)
            && geodesy::is_valid_latitude(self.secant_latitude)
            && self.false_easting.is_finite()
            && self.false_northing.is_finite()
            && self.terms.all_finite()
            && self.terms.subtype
                == StereographicSubtype::from_central_latitude(geodesy::radians(
                    self.central_latitude,
                ))
    }

    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        debug_assert!(self.is_valid());
        let (longitude, latitude) = geodesy::nudge_coordinates(longitude, latitude);
        let phi = geodesy::radians(latitude);
        let lambda = geodesy::wrap_radians(geodesy::radians(longitude) - self.terms.lambda0);

        let (x, y) = if self.terms.e == 0.0 {
            self.forward_sphere(lambda, phi)
        } else {
            self.forward_ellipsoid(lambda, phi)
        };

        let a = self.ellipsoid.major_semiaxis();
        (
            x * a - self.terms.center_x + self.false_easting,
            y * a - self.terms.center_y + self.false_northing,
        )
    }

    fn unproject(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        debug_assert!(self.is_valid());
        let a = self.ellipsoid.major_semiaxis();
        let xp = (x - self.false_easting + self.terms.center_x) / a;
        let yp = (y - self.false_northing + self.terms.center_y) / a;

        let (lambda, phi) = if self.terms.e == 0.0 {
            self.inverse_sphere(xp, yp)
        } else {
            self.inverse_ellipsoid(xp, yp)?
        };

        Ok((
            geodesy::normalize_longitude(geodesy::degrees(lambda + self.terms.lambda0)),
            geodesy::degrees(phi),
        ))
    }

    fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) -> ProjectionResult<()> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        let terms = StereographicTerms::compute(
            &ellipsoid,
            self.central_longitude,
            self.central_latitude,
            self.secant_latitude,
        )?;

        // Bootstrap on a copy so a failure leaves self untouched
        let mut updated = Self {
            ellipsoid,
            terms,
            ..self.clone()
        };
        updated.locate_center()?;

        debug!(
            major_semiaxis = ellipsoid.major_semiaxis(),
            minor_semiaxis = ellipsoid.minor_semiaxis(),
            "Updated Stereographic ellipsoid"
        );
        *self = updated;
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
