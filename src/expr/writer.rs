use std::fmt::{Formatter, Result, Write};

use itertools::Itertools;

use crate::expr::{ConstructionStyle, Expression};
use crate::{Coord, Element};

pub(crate) fn write_expression(f: &mut Formatter<'_>, expr: &Expression) -> Result {
    let model = expr.model();
    write!(f, "{}<{}>(", expr.kind(), model)?;
    match (expr.element(), expr.style()) {
        (Element::Point(coord), ConstructionStyle::Named) => {
            f.write_str("coordinate: ")?;
            write_coord(f, coord)?;
        }
        (Element::Point(coord), ConstructionStyle::Literal) => write_ordinates(f, coord)?,
        (Element::LineString(coords), ConstructionStyle::Named) => {
            f.write_str("elements: ")?;
            write_ring(f, coords)?;
        }
        (Element::LineString(coords), ConstructionStyle::Literal) => {
            f.write_str(&coords.iter().map(coord_text).join(", "))?;
        }
        (Element::Polygon { outer, inners }, style) => {
            if style == ConstructionStyle::Named {
                f.write_str("rings: (")?;
            }
            write_ring(f, outer)?;
            f.write_str(", [")?;
            for (i, inner) in inners.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_ring(f, inner)?;
            }
            f.write_char(']')?;
            if style == ConstructionStyle::Named {
                f.write_char(')')?;
            }
        }
    }
    f.write_char(')')
}

fn write_ring(f: &mut Formatter<'_>, coords: &[Coord]) -> Result {
    write!(f, "[{}]", coords.iter().map(coord_text).join(", "))
}

fn write_coord(f: &mut Formatter<'_>, coord: &Coord) -> Result {
    f.write_str(&coord_text(coord))
}

fn write_ordinates(f: &mut Formatter<'_>, coord: &Coord) -> Result {
    f.write_str(&ordinates_text(coord))
}

fn coord_text(coord: &Coord) -> String {
    format!("({})", ordinates_text(coord))
}

/// `x: 1.0, y: 1.0`. Floats use `Debug` so whole numbers keep their `.0`.
fn ordinates_text(coord: &Coord) -> String {
    coord
        .model()
        .labels()
        .iter()
        .zip(coord.ordinates())
        .map(|(label, value)| format!("{label}: {value:?}"))
        .join(", ")
}
