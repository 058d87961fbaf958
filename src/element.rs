use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};
use crate::{Coord, CoordinateModel, Precision};

/// The kind of a single element held by a geometry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A single coordinate.
    Point,
    /// An ordered sequence of coordinates.
    LineString,
    /// An outer ring plus zero or more inner rings.
    Polygon,
}

impl ElementKind {
    /// The type name used by the library under test.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Point => "Point",
            ElementKind::LineString => "LineString",
            ElementKind::Polygon => "Polygon",
        }
    }
}

impl FromStr for ElementKind {
    type Err = MatrixError;

    fn from_str(s: &str) -> MatrixResult<Self> {
        match s {
            "Point" => Ok(ElementKind::Point),
            "LineString" => Ok(ElementKind::LineString),
            "Polygon" => Ok(ElementKind::Polygon),
            _ => Err(MatrixError::Parse(format!("Unknown element type: {s}"))),
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// An element-level value: what a sample constructs.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A point.
    Point(Coord),
    /// A line string.
    LineString(Vec<Coord>),
    /// A polygon.
    Polygon {
        /// Outer ring.
        outer: Vec<Coord>,
        /// Inner rings (holes).
        inners: Vec<Vec<Coord>>,
    },
}

impl Element {
    /// The kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Point(_) => ElementKind::Point,
            Element::LineString(_) => ElementKind::LineString,
            Element::Polygon { .. } => ElementKind::Polygon,
        }
    }

    /// All coordinates, in notation order.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Element::Point(coord) => Box::new(std::iter::once(coord)),
            Element::LineString(coords) => Box::new(coords.iter()),
            Element::Polygon { outer, inners } => {
                Box::new(outer.iter().chain(inners.iter().flatten()))
            }
        }
    }

    /// The model shared by every coordinate.
    ///
    /// Returns `Ok(None)` for an element without coordinates and an error if coordinates of
    /// different models are mixed.
    pub fn model(&self) -> MatrixResult<Option<CoordinateModel>> {
        let mut coords = self.coords();
        let Some(first) = coords.next() else {
            return Ok(None);
        };
        let model = first.model();
        match coords.find(|coord| coord.model() != model) {
            Some(other) => Err(MatrixError::Construction(format!(
                "{} mixes {} and {} coordinates",
                self.kind(),
                model,
                other.model()
            ))),
            None => Ok(Some(model)),
        }
    }

    /// Apply `precision` to every ordinate of every coordinate.
    pub fn normalized(&self, precision: &Precision) -> Self {
        let ring = |coords: &[Coord]| -> Vec<Coord> {
            coords.iter().map(|c| c.normalized(precision)).collect()
        };
        match self {
            Element::Point(coord) => Element::Point(coord.normalized(precision)),
            Element::LineString(coords) => Element::LineString(ring(coords)),
            Element::Polygon { outer, inners } => Element::Polygon {
                outer: ring(outer),
                inners: inners.iter().map(|inner| ring(inner)).collect(),
            },
        }
    }
}
