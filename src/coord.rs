use crate::{CoordinateModel, Precision};

/// A single coordinate: x and y, plus optional z and measure ordinates.
///
/// Which optional ordinates are present determines the coordinate's [`CoordinateModel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    /// x ordinate.
    pub x: f64,
    /// y ordinate.
    pub y: f64,
    /// z ordinate, for spatial models.
    pub z: Option<f64>,
    /// Measure, for models with measure.
    pub m: Option<f64>,
}

impl Coord {
    /// Planar coordinate.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Planar coordinate with measure.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    /// Spatial coordinate.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    /// Spatial coordinate with measure.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Build a coordinate of `model` from ordinates given in notation order (x, y, z, m).
    ///
    /// Returns `None` if the number of ordinates does not match the model.
    pub fn from_ordinates(model: CoordinateModel, ordinates: &[f64]) -> Option<Self> {
        match (model, ordinates) {
            (CoordinateModel::XY, &[x, y]) => Some(Self::xy(x, y)),
            (CoordinateModel::XYM, &[x, y, m]) => Some(Self::xym(x, y, m)),
            (CoordinateModel::XYZ, &[x, y, z]) => Some(Self::xyz(x, y, z)),
            (CoordinateModel::XYZM, &[x, y, z, m]) => Some(Self::xyzm(x, y, z, m)),
            _ => None,
        }
    }

    /// The model implied by which ordinates are present.
    pub fn model(&self) -> CoordinateModel {
        CoordinateModel::from_flags(self.z.is_some(), self.m.is_some())
    }

    /// Ordinates in notation order (x, y, z, m), skipping absent ones.
    pub fn ordinates(&self) -> impl Iterator<Item = f64> {
        [Some(self.x), Some(self.y), self.z, self.m]
            .into_iter()
            .flatten()
    }

    /// Apply `precision` to every ordinate.
    pub fn normalized(&self, precision: &Precision) -> Self {
        Self {
            x: precision.convert(self.x),
            y: precision.convert(self.y),
            z: self.z.map(|z| precision.convert(z)),
            m: self.m.map(|m| precision.convert(m)),
        }
    }
}
