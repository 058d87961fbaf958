//! The seam to the geometry library under test.

use std::fmt::Debug;

use crate::error::{MatrixError, MatrixResult};
use crate::{CoordinateModel, CoordinateSystem, Element, Precision};

/// Everything a library needs to build an element besides its ordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Construction {
    /// Coordinate model the element is declared with.
    pub model: CoordinateModel,
    /// Precision policy ordinates are interpreted under.
    pub precision: Precision,
    /// Reference system.
    pub coordinate_system: CoordinateSystem,
}

impl Construction {
    /// Construct a new context from parts.
    pub fn new(
        model: CoordinateModel,
        precision: Precision,
        coordinate_system: CoordinateSystem,
    ) -> Self {
        Self {
            model,
            precision,
            coordinate_system,
        }
    }
}

/// The two capabilities the matrix needs from a geometry library.
pub trait GeometryLibrary {
    /// The library's own element type.
    type Geometry: Debug;

    /// Build the library's element from raw ordinates under `construction`.
    fn construct(&self, element: &Element, construction: &Construction)
        -> MatrixResult<Self::Geometry>;

    /// Structural equality: same shape and every ordinate equal.
    fn equals(&self, lhs: &Self::Geometry, rhs: &Self::Geometry) -> bool;
}

impl<L: GeometryLibrary + ?Sized> GeometryLibrary for &L {
    type Geometry = L::Geometry;

    fn construct(
        &self,
        element: &Element,
        construction: &Construction,
    ) -> MatrixResult<Self::Geometry> {
        (**self).construct(element, construction)
    }

    fn equals(&self, lhs: &Self::Geometry, rhs: &Self::Geometry) -> bool {
        (**self).equals(lhs, rhs)
    }
}

/// A library that stores elements exactly as the precision contract prescribes.
///
/// Used as the oracle when checking a table against itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLibrary;

impl GeometryLibrary for ReferenceLibrary {
    type Geometry = Element;

    fn construct(
        &self,
        element: &Element,
        construction: &Construction,
    ) -> MatrixResult<Self::Geometry> {
        if let Some(model) = element.model()? {
            if model != construction.model {
                return Err(MatrixError::Construction(format!(
                    "{} coordinates passed for a {} element",
                    model, construction.model
                )));
            }
        }
        Ok(element.normalized(&construction.precision))
    }

    fn equals(&self, lhs: &Self::Geometry, rhs: &Self::Geometry) -> bool {
        lhs == rhs
    }
}
