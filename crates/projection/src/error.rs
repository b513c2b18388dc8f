//! Error types for projector construction and coordinate transforms.

use thiserror::Error;

/// Result type alias using ProjectionError.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Primary error type for projection operations.
#[derive(Debug, Error)]
pub enum ProjectionError {
    // === Construction Errors ===
    #[error("Invalid ellipsoid: major semiaxis {major}, minor semiaxis {minor}")]
    InvalidEllipsoid { major: f64, minor: f64 },

    #[error("Invalid longitude for '{param}': {value} (expected [-180, 180])")]
    InvalidLongitude { param: &'static str, value: f64 },

    #[error("Invalid latitude for '{param}': {value} (expected [-90, 90])")]
    InvalidLatitude { param: &'static str, value: f64 },

    #[error("Invalid standard parallels: lower {lower}, upper {upper}")]
    InvalidStandardParallels { lower: f64, upper: f64 },

    #[error("Invalid false offset: easting {easting}, northing {northing}")]
    InvalidFalseOffset { easting: f64, northing: f64 },

    #[error("Derived term '{0}' is not finite")]
    DegenerateTerm(&'static str),

    // === Transform Errors ===
    #[error("Inverse latitude iteration did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    // === Header Errors ===
    #[error("Invalid projection header: {0}")]
    InvalidHeader(String),

    #[error("Failed to read projection header: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    /// True for errors raised while validating constructor or setter input.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            ProjectionError::InvalidEllipsoid { .. }
                | ProjectionError::InvalidLongitude { .. }
                | ProjectionError::InvalidLatitude { .. }
                | ProjectionError::InvalidStandardParallels { .. }
                | ProjectionError::InvalidFalseOffset { .. }
                | ProjectionError::DegenerateTerm(_)
        )
    }
}
