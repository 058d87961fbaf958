//! Construction expressions: the textual notation the library under test uses to build an
//! element, in either the named (field-labeled) or literal (positional) style.
//!
//! ```
//! use geomatrix::expr::{ConstructionStyle, Expression};
//!
//! let named: Expression = "Point<Coordinate2D>(coordinate: (x: 1.0, y: 1.0))".parse().unwrap();
//! let literal: Expression = "Point<Coordinate2D>(x: 1.0, y: 1.0)".parse().unwrap();
//!
//! assert_eq!(named.style(), ConstructionStyle::Named);
//! assert_eq!(literal.style(), ConstructionStyle::Literal);
//! assert_eq!(named.element(), literal.element());
//! assert_eq!(named.with_style(ConstructionStyle::Literal), literal);
//! ```

mod reader;
mod tokenizer;
mod writer;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::{CoordinateModel, Element, ElementKind};

/// The notation an expression is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionStyle {
    /// Explicit field labels, e.g. `Point<Coordinate2D>(coordinate: (x: 1.0, y: 1.0))`.
    Named,
    /// Bare positional form, e.g. `Point<Coordinate2D>(x: 1.0, y: 1.0)`.
    Literal,
}

impl Display for ConstructionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionStyle::Named => write!(f, "named"),
            ConstructionStyle::Literal => write!(f, "literal"),
        }
    }
}

/// An element together with the coordinate model it is declared with and the notation it is
/// written in.
///
/// Serialized as its textual notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Expression {
    model: CoordinateModel,
    style: ConstructionStyle,
    element: Element,
}

impl Expression {
    /// Construct a new expression from parts.
    ///
    /// The element's coordinates are not checked against `model` here; rows are validated when
    /// they are expanded.
    pub fn new(style: ConstructionStyle, model: CoordinateModel, element: Element) -> Self {
        Self {
            model,
            style,
            element,
        }
    }

    /// Shorthand for a [`ConstructionStyle::Named`] expression.
    pub fn named(model: CoordinateModel, element: Element) -> Self {
        Self::new(ConstructionStyle::Named, model, element)
    }

    /// Shorthand for a [`ConstructionStyle::Literal`] expression.
    pub fn literal(model: CoordinateModel, element: Element) -> Self {
        Self::new(ConstructionStyle::Literal, model, element)
    }

    /// The coordinate model in the expression's type parameter.
    pub fn model(&self) -> CoordinateModel {
        self.model
    }

    /// The notation this expression is written in.
    pub fn style(&self) -> ConstructionStyle {
        self.style
    }

    /// The element this expression constructs.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The kind of the constructed element.
    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    /// The same value written in another notation.
    pub fn with_style(&self, style: ConstructionStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

impl FromStr for Expression {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        reader::read_expression(s)
    }
}

impl TryFrom<String> for Expression {
    type Error = MatrixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Expression> for String {
    fn from(value: Expression) -> Self {
        value.to_string()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writer::write_expression(f, self)
    }
}
