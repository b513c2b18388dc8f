//! Two-line ASCII projection header.
//!
//! ```text
//! # lcc projection: lat_1 lat_2 lat_0 lon_0 major_semiaxis minor_semiaxis
//! 33 45 40 -97 6370000 6370000
//! ```
//!
//! The first non-blank line names the family, the second carries its numeric
//! parameters. Lines after those two are ignored, so a header can be read from
//! the top of a larger file. False easting/northing are not part of the
//! format and default to zero.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ellipsoid::Ellipsoid;
use crate::error::{ProjectionError, ProjectionResult};
use crate::projector::{build_projector, ProjectionParameters, Projector};

/// Parsed projection header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "projection", rename_all = "lowercase")]
pub enum ProjectionHeader {
    Lambert {
        lower_latitude: f64,
        upper_latitude: f64,
        central_latitude: f64,
        central_longitude: f64,
        ellipsoid: Ellipsoid,
    },
    Stereographic {
        central_longitude: f64,
        central_latitude: f64,
        secant_latitude: f64,
        ellipsoid: Ellipsoid,
    },
    Mercator {
        central_longitude: f64,
        ellipsoid: Ellipsoid,
    },
    /// Identity, no projection. Handled by the caller.
    LonLat { ellipsoid: Ellipsoid },
}

impl ProjectionHeader {
    /// Parse header text.
    pub fn parse(text: &str) -> ProjectionResult<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let family_line = lines
            .next()
            .ok_or_else(|| ProjectionError::InvalidHeader("empty header".to_string()))?;
        let value_line = lines.next().ok_or_else(|| {
            ProjectionError::InvalidHeader("missing parameter line".to_string())
        })?;

        let family = parse_family(family_line)?;
        let values = parse_values(value_line)?;

        let expected = match family {
            "lcc" => 6,
            "stereographic" => 5,
            "mercator" => 3,
            "lonlat" => 2,
            other => {
                return Err(ProjectionError::InvalidHeader(format!(
                    "unknown projection '{}'",
                    other
                )))
            }
        };
        if values.len() != expected {
            return Err(ProjectionError::InvalidHeader(format!(
                "{} projection expects {} values, found {}",
                family,
                expected,
                values.len()
            )));
        }

        let ellipsoid = Ellipsoid::new(values[expected - 2], values[expected - 1])?;
        let header = match family {
            "lcc" => ProjectionHeader::Lambert {
                lower_latitude: values[0],
                upper_latitude: values[1],
                central_latitude: values[2],
                central_longitude: values[3],
                ellipsoid,
            },
            "stereographic" => ProjectionHeader::Stereographic {
                central_longitude: values[0],
                central_latitude: values[1],
                secant_latitude: values[2],
                ellipsoid,
            },
            "mercator" => ProjectionHeader::Mercator {
                central_longitude: values[0],
                ellipsoid,
            },
            _ => ProjectionHeader::LonLat { ellipsoid },
        };

        debug!(family, ?header, "Parsed projection header");
        Ok(header)
    }

    /// Header describing an existing projector. False offsets are dropped.
    pub fn from_projector(projector: &dyn Projector) -> Self {
        let ellipsoid = projector.ellipsoid();
        match projector.parameters() {
            ProjectionParameters::Lambert {
                lower_latitude,
                upper_latitude,
                central_longitude,
                central_latitude,
            } => ProjectionHeader::Lambert {
                lower_latitude,
                upper_latitude,
                central_latitude,
                central_longitude,
                ellipsoid,
            },
            ProjectionParameters::Mercator { central_longitude } => ProjectionHeader::Mercator {
                central_longitude,
                ellipsoid,
            },
            ProjectionParameters::Stereographic {
                central_longitude,
                central_latitude,
                secant_latitude,
            } => ProjectionHeader::Stereographic {
                central_longitude,
                central_latitude,
                secant_latitude,
                ellipsoid,
            },
        }
    }

    /// Family keyword used on the first header line.
    pub fn family(&self) -> &'static str {
        match self {
            ProjectionHeader::Lambert { .. } => "lcc",
            ProjectionHeader::Stereographic { .. } => "stereographic",
            ProjectionHeader::Mercator { .. } => "mercator",
            ProjectionHeader::LonLat { .. } => "lonlat",
        }
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            ProjectionHeader::Lambert { ellipsoid, .. }
            | ProjectionHeader::Stereographic { ellipsoid, .. }
            | ProjectionHeader::Mercator { ellipsoid, .. }
            | ProjectionHeader::LonLat { ellipsoid } => *ellipsoid,
        }
    }

    /// Projector parameters, `None` for lonlat.
    pub fn parameters(&self) -> Option<ProjectionParameters> {
        match *self {
            ProjectionHeader::Lambert {
                lower_latitude,
                upper_latitude,
                central_latitude,
                central_longitude,
                ..
            } => Some(ProjectionParameters::Lambert {
                lower_latitude,
                upper_latitude,
                central_longitude,
                central_latitude,
            }),
            ProjectionHeader::Stereographic {
                central_longitude,
                central_latitude,
                secant_latitude,
                ..
            } => Some(ProjectionParameters::Stereographic {
                central_longitude,
                central_latitude,
                secant_latitude,
            }),
            ProjectionHeader::Mercator {
                central_longitude, ..
            } => Some(ProjectionParameters::Mercator { central_longitude }),
            ProjectionHeader::LonLat { .. } => None,
        }
    }

    /// Build the projector this header describes, with zero false offsets.
    ///
    /// Returns `Ok(None)` for lonlat.
    pub fn into_projector(self) -> ProjectionResult<Option<Box<dyn Projector>>> {
        match self.parameters() {
            Some(parameters) => Ok(Some(build_projector(
                parameters,
                self.ellipsoid(),
                0.0,
                0.0,
            )?)),
            None => Ok(None),
        }
    }
}

impl FromStr for ProjectionHeader {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProjectionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ellipsoid = self.ellipsoid();
        let (a, b) = (ellipsoid.major_semiaxis(), ellipsoid.minor_semiaxis());
        match self {
            ProjectionHeader::Lambert {
                lower_latitude,
                upper_latitude,
                central_latitude,
                central_longitude,
                ..
            } => {
                writeln!(
                    f,
                    "# lcc projection: lat_1 lat_2 lat_0 lon_0 major_semiaxis minor_semiaxis"
                )?;
                writeln!(
                    f,
                    "{} {} {} {} {} {}",
                    lower_latitude, upper_latitude, central_latitude, central_longitude, a, b
                )
            }
            ProjectionHeader::Stereographic {
                central_longitude,
                central_latitude,
                secant_latitude,
                ..
            } => {
                writeln!(
                    f,
                    "# stereographic projection: lon_0 lat_0 lat_sec major_semiaxis minor_semiaxis"
                )?;
                writeln!(
                    f,
                    "{} {} {} {} {}",
                    central_longitude, central_latitude, secant_latitude, a, b
                )
            }
            ProjectionHeader::Mercator {
                central_longitude, ..
            } => {
                writeln!(f, "# mercator projection: lon_0 major_semiaxis minor_semiaxis")?;
                writeln!(f, "{} {} {}", central_longitude, a, b)
            }
            ProjectionHeader::LonLat { .. } => {
                writeln!(f, "# lonlat projection: major_semiaxis minor_semiaxis")?;
                writeln!(f, "{} {}", a, b)
            }
        }
    }
}

/// Read and parse the header at the top of a file.
pub fn read_header(path: impl AsRef<Path>) -> ProjectionResult<ProjectionHeader> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "Reading projection header");
    ProjectionHeader::parse(&text)
}

/// `# <family> projection: ...` -> `<family>`
fn parse_family(line: &str) -> ProjectionResult<&str> {
    let rest = line.strip_prefix('#').ok_or_else(|| {
        ProjectionError::InvalidHeader(format!("expected '# <family> projection:', got '{}'", line))
    })?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(family), Some(keyword)) if keyword.starts_with("projection") => Ok(family),
        _ => Err(ProjectionError::InvalidHeader(format!(
            "expected '# <family> projection:', got '{}'",
            line
        ))),
    }
}

fn parse_values(line: &str) -> ProjectionResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    ProjectionError::InvalidHeader(format!("invalid number '{}'", token))
                })
        })
        .collect()
}
