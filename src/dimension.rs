use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};

/// The coordinate model of an element: which ordinates each coordinate carries.
///
/// Serialized using the coordinate type names of the library under test, e.g. `"Coordinate2DM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateModel {
    /// Planar (x, y).
    #[serde(rename = "Coordinate2D")]
    XY,

    /// Planar with measure (x, y, m).
    #[serde(rename = "Coordinate2DM")]
    XYM,

    /// Spatial (x, y, z).
    #[serde(rename = "Coordinate3D")]
    XYZ,

    /// Spatial with measure (x, y, z, m).
    #[serde(rename = "Coordinate3DM")]
    XYZM,
}

impl CoordinateModel {
    /// All coordinate models, in the order the matrix lists them.
    pub const ALL: [CoordinateModel; 4] = [Self::XY, Self::XYM, Self::XYZ, Self::XYZM];

    /// Returns the number of ordinates.
    pub fn size(&self) -> usize {
        match self {
            CoordinateModel::XY => 2,
            CoordinateModel::XYM => 3,
            CoordinateModel::XYZ => 3,
            CoordinateModel::XYZM => 4,
        }
    }

    /// Whether coordinates carry a z ordinate.
    pub fn has_z(&self) -> bool {
        matches!(self, CoordinateModel::XYZ | CoordinateModel::XYZM)
    }

    /// Whether coordinates carry a measure.
    pub fn has_m(&self) -> bool {
        matches!(self, CoordinateModel::XYM | CoordinateModel::XYZM)
    }

    pub(crate) fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => CoordinateModel::XY,
            (false, true) => CoordinateModel::XYM,
            (true, false) => CoordinateModel::XYZ,
            (true, true) => CoordinateModel::XYZM,
        }
    }

    /// The coordinate type name used by the library under test.
    pub fn type_name(&self) -> &'static str {
        match self {
            CoordinateModel::XY => "Coordinate2D",
            CoordinateModel::XYM => "Coordinate2DM",
            CoordinateModel::XYZ => "Coordinate3D",
            CoordinateModel::XYZM => "Coordinate3DM",
        }
    }

    /// Ordinate labels in notation order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            CoordinateModel::XY => &["x", "y"],
            CoordinateModel::XYM => &["x", "y", "m"],
            CoordinateModel::XYZ => &["x", "y", "z"],
            CoordinateModel::XYZM => &["x", "y", "z", "m"],
        }
    }
}

impl FromStr for CoordinateModel {
    type Err = MatrixError;

    fn from_str(s: &str) -> MatrixResult<Self> {
        match s {
            "Coordinate2D" => Ok(CoordinateModel::XY),
            "Coordinate2DM" => Ok(CoordinateModel::XYM),
            "Coordinate3D" => Ok(CoordinateModel::XYZ),
            "Coordinate3DM" => Ok(CoordinateModel::XYZM),
            _ => Err(MatrixError::Parse(format!(
                "Unknown coordinate type: {s}"
            ))),
        }
    }
}

impl From<CoordinateModel> for geo_traits::Dimensions {
    fn from(value: CoordinateModel) -> Self {
        match value {
            CoordinateModel::XY => geo_traits::Dimensions::Xy,
            CoordinateModel::XYZ => geo_traits::Dimensions::Xyz,
            CoordinateModel::XYM => geo_traits::Dimensions::Xym,
            CoordinateModel::XYZM => geo_traits::Dimensions::Xyzm,
        }
    }
}

impl TryFrom<geo_traits::Dimensions> for CoordinateModel {
    type Error = MatrixError;

    fn try_from(value: geo_traits::Dimensions) -> std::result::Result<Self, Self::Error> {
        match value {
            geo_traits::Dimensions::Xy | geo_traits::Dimensions::Unknown(2) => {
                Ok(CoordinateModel::XY)
            }
            geo_traits::Dimensions::Xyz | geo_traits::Dimensions::Unknown(3) => {
                Ok(CoordinateModel::XYZ)
            }
            geo_traits::Dimensions::Xym => Ok(CoordinateModel::XYM),
            geo_traits::Dimensions::Xyzm | geo_traits::Dimensions::Unknown(4) => {
                Ok(CoordinateModel::XYZM)
            }
            _ => Err(MatrixError::InvalidDimension(format!(
                "Unsupported dimension {value:?}"
            ))),
        }
    }
}

impl Display for CoordinateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
