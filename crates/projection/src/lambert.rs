//! Lambert Conformal Conic projection.
//!
//! This projection is commonly used for regional air-quality and weather
//! grids (CMAQ, WRF, HRRR). It maps a cone tangent or secant to the Earth's
//! surface onto a flat plane.
//!
//! The projection parameters include:
//! - Standard parallels: lower and upper latitude (equal for a tangent cone)
//! - Central meridian (lon_0) and central latitude (lat_0) of the origin
//! - Ellipsoid semiaxes (equal for a sphere)
//! - False easting/northing added to every projected coordinate

use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ProjectionResult};
use crate::geodesy::{self, TOLERANCE};
use crate::projector::{ProjectionKind, ProjectionParameters, Projector};

/// Lambert Conformal Conic projector.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    ellipsoid: Ellipsoid,
    /// Lower standard parallel (degrees)
    lower_latitude: f64,
    /// Upper standard parallel (degrees)
    upper_latitude: f64,
    /// Central meridian (degrees)
    central_longitude: f64,
    /// Latitude of the projected origin (degrees)
    central_latitude: f64,
    false_easting: f64,
    false_northing: f64,
    terms: LambertTerms,
}

/// Terms derived from the user parameters. Always replaced as a whole.
#[derive(Debug, Clone, Copy)]
struct LambertTerms {
    /// Eccentricity
    e: f64,
    /// Central meridian in radians
    lambda0: f64,
    /// Cone constant (n)
    n: f64,
    /// Scale constant (c)
    c: f64,
    /// Radius at the central latitude, in semiaxis units
    rho0: f64,
}

impl LambertTerms {
    fn compute(
        ellipsoid: &Ellipsoid,
        lower_latitude: f64,
        upper_latitude: f64,
        central_longitude: f64,
        central_latitude: f64,
    ) -> ProjectionResult<Self> {
        let e = ellipsoid.eccentricity();
        let es = e * e;
        let phi1 = geodesy::radians(lower_latitude);
        let phi2 = geodesy::radians(upper_latitude);
        let phi0 = geodesy::radians(central_latitude);

        let n = geodesy::check_finite("n", cone_constant(phi1, phi2, e))?;

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let m1 = geodesy::msfn(sin_phi1, cos_phi1, es);
        let t1 = geodesy::tsfn(phi1, sin_phi1, e);
        let c = geodesy::check_finite("c", m1 / (n * t1.powf(n)))?;

        let rho0 = if (phi0.abs() - FRAC_PI_2).abs() < TOLERANCE {
            0.0
        } else {
            c * geodesy::tsfn(phi0, phi0.sin(), e).powf(n)
        };
        let rho0 = geodesy::check_finite("rho0", rho0)?;

        Ok(Self {
            e,
            lambda0: geodesy::radians(central_longitude),
            n,
            c,
            rho0,
        })
    }
}

/// Cone constant for standard parallels `phi1`, `phi2` (radians).
///
/// Tangent cone: `sin(phi1)`. Secant cone: `ln(m1/m2) / ln(t1/t2)` with
/// `m = msfn`, `t = tsfn`. Both logarithms are evaluated from the half
/// difference of the parallels, so nearly equal parallels converge to the
/// tangent value instead of dividing two vanishing, rounding-dominated terms.
pub(crate) fn cone_constant(phi1: f64, phi2: f64, e: f64) -> f64 {
    if (phi1 - phi2).abs() < TOLERANCE {
        return phi1.sin();
    }

    let es = e * e;
    let mid = 0.5 * (phi1 + phi2);
    let half = 0.5 * (phi1 - phi2);
    let (sin1, cos1) = phi1.sin_cos();
    let (sin2, cos2) = phi2.sin_cos();
    // sin1 - sin2 without cancellation
    let sin_difference = 2.0 * mid.cos() * half.sin();

    // ln(m1/m2) = ln(cos1/cos2) - ln((1 - es·sin1²)/(1 - es·sin2²))/2
    let log_cos = (-2.0 * mid.sin() * half.sin() / cos2).ln_1p();
    let log_w = (-es * sin_difference * (sin1 + sin2) / (1.0 - es * sin2 * sin2)).ln_1p();
    let log_m = log_cos - 0.5 * log_w;

    // ln t = -asinh(tan φ) + e·atanh(e·sin φ)
    let log_t = -(sin_difference / (cos1 * cos2)).asinh()
        + e * (e * sin_difference / (1.0 - es * sin1 * sin2)).atanh();

    log_m / log_t
}

fn check_standard_parallels(lower: f64, upper: f64) -> ProjectionResult<()> {
    let in_band = |latitude: f64| (1.0..=89.0).contains(&latitude.abs());
    let same_sign = (lower > 0.0) == (upper > 0.0);
    if in_band(lower) && in_band(upper) && same_sign && lower <= upper {
        Ok(())
    } else {
        Err(ProjectionError::InvalidStandardParallels { lower, upper })
    }
}

impl LambertConformal {
    /// Create a new Lambert Conformal Conic projector.
    ///
    /// # Arguments
    /// * `ellipsoid` - Planet approximation
    /// * `lower_latitude` - Lower standard parallel (degrees)
    /// * `upper_latitude` - Upper standard parallel (degrees)
    /// * `central_longitude` - Central meridian (degrees)
    /// * `central_latitude` - Latitude of the origin (degrees)
    /// * `false_easting` - Added to every projected x (meters)
    /// * `false_northing` - Added to every projected y (meters)
    ///
    /// The standard parallels must share sign, lie in [1, 89] or [-89, -1],
    /// and satisfy `lower_latitude <= upper_latitude`.
    pub fn new(
        ellipsoid: Ellipsoid,
        lower_latitude: f64,
        upper_latitude: f64,
        central_longitude: f64,
        central_latitude: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> ProjectionResult<Self> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        geodesy::check_latitude("lower_latitude", lower_latitude)?;
        geodesy::check_latitude("upper_latitude", upper_latitude)?;
        check_standard_parallels(lower_latitude, upper_latitude)?;
        geodesy::check_longitude("central_longitude", central_longitude)?;
        geodesy::check_latitude("central_latitude", central_latitude)?;
        geodesy::check_false_offset(false_easting, false_northing)?;

        let terms = LambertTerms::compute(
            &ellipsoid,
            lower_latitude,
            upper_latitude,
            central_longitude,
            central_latitude,
        )?;

        debug!(
            lower_latitude,
            upper_latitude,
            central_longitude,
            central_latitude,
            n = terms.n,
            "Created Lambert projector"
        );

        Ok(Self {
            ellipsoid,
            lower_latitude,
            upper_latitude,
            central_longitude,
            central_latitude,
            false_easting,
            false_northing,
            terms,
        })
    }

    pub fn lower_latitude(&self) -> f64 {
        self.lower_latitude
    }

    pub fn upper_latitude(&self) -> f64 {
        self.upper_latitude
    }

    /// Cone constant (n); `sin(lower_latitude)` for a tangent cone.
    pub fn cone_constant(&self) -> f64 {
        self.terms.n
    }

    /// True when the two standard parallels coincide.
    pub fn is_tangent(&self) -> bool {
        (geodesy::radians(self.upper_latitude) - geodesy::radians(self.lower_latitude)).abs()
            < TOLERANCE
    }
}

impl Projector for LambertConformal {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Lambert
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
        ProjectionParameters::Lambert {
            lower_latitude: self.lower_latitude,
            upper_latitude: self.upper_latitude,
            central_longitude: self.central_longitude,
            central_latitude: self.central_latitude,
        }
    }

    fn is_valid(&self) -> bool {
        let t = &self.terms;
        self.ellipsoid.is_valid()
            && geodesy::is_valid_latitude(self.lower_latitude)
            && geodesy::is_valid_latitude(self.upper_latitude)
            && check_standard_parallels(self.lower_latitude, self.upper_latitude).is_ok()
            && geodesy::is_valid_longitude(self.central_longitude)
            && geodesy::is_valid_latitude(self.central_latitude)
            && self.false_easting.is_finite()
            && self.false_northing.is_finite()
            && [t.e, t.lambda0, t.n, t.c, t.rho0].iter().all(|v| v.is_finite())
    }

    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        debug_assert!(self.is_valid());
        let t = &self.terms;
        let (longitude, latitude) = geodesy::nudge_coordinates(longitude, latitude);
        let phi = geodesy::radians(latitude);
        let lambda = geodesy::radians(longitude);

        // Same expression for the sphere, where tsfn reduces to tan(π/4 − φ/2)
        let rho = t.c * geodesy::tsfn(phi, phi.sin(), t.e).powf(t.n);
        let theta = t.n * geodesy::wrap_radians(lambda - t.lambda0);
        let a = self.ellipsoid.major_semiaxis();

        let x = rho * theta.sin() * a + self.false_easting;
        let y = (t.rho0 - rho * theta.cos()) * a + self.false_northing;
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        debug_assert!(self.is_valid());
        let t = &self.terms;
        let a = self.ellipsoid.major_semiaxis();

        let mut xp = (x - self.false_easting) / a;
        let mut yp = t.rho0 - (y - self.false_northing) / a;
        let mut rho = xp.hypot(yp);

        if rho == 0.0 {
            // Cone apex
            let latitude = if t.n > 0.0 { 90.0 } else { -90.0 };
            return Ok((self.central_longitude, latitude));
        }

        if t.n < 0.0 {
            rho = -rho;
            xp = -xp;
            yp = -yp;
        }

        let phi = if t.e == 0.0 {
            2.0 * (t.c / rho).powf(1.0 / t.n).atan() - FRAC_PI_2
        } else {
            geodesy::phi2_iterate((rho / t.c).powf(1.0 / t.n), t.e)?
        };
        let lambda = xp.atan2(yp) / t.n + t.lambda0;

        Ok((
            geodesy::normalize_longitude(geodesy::degrees(lambda)),
            geodesy::degrees(phi),
        ))
    }

    fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) -> ProjectionResult<()> {
        geodesy::check_ellipsoid(ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis())?;
        let terms = LambertTerms::compute(
            &ellipsoid,
            self.lower_latitude,
            self.upper_latitude,
            self.central_longitude,
            self.central_latitude,
        )?;
        debug!(
            major_semiaxis = ellipsoid.major_semiaxis(),
            minor_semiaxis = ellipsoid.minor_semiaxis(),
            "Updated Lambert ellipsoid"
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
