//! The matrix shipped with the crate.
//!
//! Rows are declared per class with small builders instead of listing every coordinate model
//! and precision pair by hand. Disabled rows are combinations the library does not exercise yet.

use crate::expr::Expression;
use crate::table::{ClassEntry, Sample, VariantRow, VariantTable};
use crate::{Coord, CoordinateModel, Element, GeometryClassSpec, Precision};

const SCALE: i64 = 100;

pub(super) fn table() -> VariantTable {
    let classes = [
        (GeometryClassSpec::multi_point(), multi_point()),
        (GeometryClassSpec::multi_line_string(), multi_line_string()),
        (GeometryClassSpec::geometry_collection(), geometry_collection()),
    ]
    .into_iter()
    .map(|(spec, rows)| (spec.name().to_string(), ClassEntry { spec, rows }))
    .collect();
    VariantTable { classes }
}

/// A coordinate of `model` with every ordinate set to `value`.
fn uniform(model: CoordinateModel, value: f64) -> Coord {
    lift(model, value, value, value)
}

/// A coordinate of `model` with x and y given and any z or m set to `extra`.
fn lift(model: CoordinateModel, x: f64, y: f64, extra: f64) -> Coord {
    Coord {
        x,
        y,
        z: model.has_z().then_some(extra),
        m: model.has_m().then_some(extra),
    }
}

/// A sample whose raw input is written in the named style and whose expected value is given in
/// both styles.
fn sample(model: CoordinateModel, raw: Element, expected: Element) -> Sample {
    Sample::new(
        Expression::named(model, raw),
        Expression::named(model, expected.clone()),
        Some(Expression::literal(model, expected)),
    )
}

fn row(
    model: CoordinateModel,
    precision: Precision,
    [(raw_1, expected_1), (raw_2, expected_2)]: [(Element, Element); 2],
) -> VariantRow {
    VariantRow::new(
        model,
        precision,
        [
            sample(model, raw_1, expected_1),
            sample(model, raw_2, expected_2),
        ],
    )
}

/// Two points, `1` and `2` in every ordinate, exact and with a third decimal that fixed
/// precision drops.
fn point_rows(model: CoordinateModel) -> [VariantRow; 2] {
    let point = |value| Element::Point(uniform(model, value));
    [
        row(
            model,
            Precision::Floating,
            [(point(1.0), point(1.0)), (point(2.0), point(2.0))],
        ),
        row(
            model,
            Precision::fixed(SCALE),
            [(point(1.001), point(1.0)), (point(2.002), point(2.0))],
        ),
    ]
}

fn multi_point() -> Vec<VariantRow> {
    let [floating, fixed]: [Vec<VariantRow>; 2] = [0, 1].map(|i| {
        CoordinateModel::ALL
            .iter()
            .map(|model| point_rows(*model)[i].clone())
            .collect()
    });
    floating.into_iter().chain(fixed).collect()
}

fn line(model: CoordinateModel, extra: f64, xy: &[(f64, f64)]) -> Element {
    Element::LineString(xy.iter().map(|&(x, y)| lift(model, x, y, extra)).collect())
}

fn multi_line_string() -> Vec<VariantRow> {
    let exact_1 = [(0.0, 0.0), (0.0, 2.0), (0.0, 3.0), (2.0, 0.0), (0.0, 0.0)];
    let exact_2 = [(0.0, 1.0), (0.0, 2.0), (0.0, 3.0), (2.0, 0.0), (0.0, 1.0)];
    let raw_1 = [(0.0, 0.0), (0.0, 2.002), (0.0, 3.003), (2.002, 0.0), (0.0, 0.0)];
    let raw_2 = [(0.0, 1.001), (0.0, 2.002), (0.0, 3.003), (2.002, 0.0), (0.0, 1.001)];

    let floating = |model| {
        row(
            model,
            Precision::Floating,
            [
                (line(model, 2.0, &exact_1), line(model, 2.0, &exact_1)),
                (line(model, 2.0, &exact_2), line(model, 2.0, &exact_2)),
            ],
        )
    };
    let fixed = |model| {
        row(
            model,
            Precision::fixed(SCALE),
            [
                (line(model, 2.002, &raw_1), line(model, 2.0, &exact_1)),
                (line(model, 2.002, &raw_2), line(model, 2.0, &exact_2)),
            ],
        )
    };

    // The second measured sample starts with an exact measure.
    let fixed_xym = {
        let model = CoordinateModel::XYM;
        let mut raw = line(model, 2.002, &raw_2);
        if let Element::LineString(coords) = &mut raw {
            coords[0].m = Some(2.0);
        }
        row(
            model,
            Precision::fixed(SCALE),
            [
                (line(model, 2.002, &raw_1), line(model, 2.0, &exact_1)),
                (raw, line(model, 2.0, &exact_2)),
            ],
        )
    };

    vec![
        floating(CoordinateModel::XY),
        floating(CoordinateModel::XYM),
        floating(CoordinateModel::XYZ).disabled(),
        floating(CoordinateModel::XYZM).disabled(),
        fixed(CoordinateModel::XY),
        fixed_xym,
        fixed(CoordinateModel::XYZ).disabled(),
        fixed(CoordinateModel::XYZM).disabled(),
    ]
}

fn geometry_collection() -> Vec<VariantRow> {
    let xy = |coords: &[(f64, f64)]| -> Vec<Coord> {
        coords.iter().map(|&(x, y)| Coord::xy(x, y)).collect()
    };
    let polygon = || Element::Polygon {
        outer: xy(&[(6.0, 1.0), (1.0, 1.0), (1.0, 3.0), (3.5, 4.0), (6.0, 3.0)]),
        inners: vec![],
    };

    let mut rows = vec![row(
        CoordinateModel::XY,
        Precision::Floating,
        [(polygon(), polygon()), (polygon(), polygon())],
    )];

    // Mixed collections are only exercised with planar polygons so far.
    let [_, xym, xyz, xyzm] = CoordinateModel::ALL;
    for model in [xym, xyz, xyzm] {
        rows.push(point_rows(model)[0].clone().disabled());
    }
    for model in CoordinateModel::ALL {
        rows.push(point_rows(model)[1].clone().disabled());
    }
    rows
}
