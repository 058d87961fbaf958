use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};

/// The reference frame under which coordinates are interpreted.
///
/// The library under test declares ellipsoidal, spherical, vertical and polar systems but only
/// implements the Cartesian one, so only [`CoordinateSystem::Cartesian`] can appear in a row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Planar Cartesian system. Takes no parameters.
    #[default]
    Cartesian,
}

/// Systems the library names but rejects.
const UNSUPPORTED: [&str; 4] = ["Ellipsoidal", "Spherical", "Vertical", "Polar"];

impl CoordinateSystem {
    /// The type name used by the library under test.
    pub fn type_name(&self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian => "Cartesian",
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = MatrixError;

    fn from_str(s: &str) -> MatrixResult<Self> {
        match s {
            "Cartesian" => Ok(CoordinateSystem::Cartesian),
            _ if UNSUPPORTED.contains(&s) => {
                Err(MatrixError::UnsupportedCoordinateSystem(s.to_string()))
            }
            _ => Err(MatrixError::Parse(format!("Unknown coordinate system: {s}"))),
        }
    }
}

impl Display for CoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}()", self.type_name())
    }
}
