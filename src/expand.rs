//! Expansion of variant rows into assertions, and their evaluation against a
//! [`GeometryLibrary`].

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{AssertionFailure, MatrixError, MatrixResult};
use crate::expr::{ConstructionStyle, Expression};
use crate::library::{Construction, GeometryLibrary};
use crate::table::{Sample, VariantRow, VariantTable};
use crate::{CoordinateModel, CoordinateSystem, GeometryClassSpec, Precision};

/// Which equality an [`Assertion`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssertionKind {
    /// Raw input under the row's policy equals the named expected value.
    RawMatchesNamed,
    /// Raw input under the row's policy equals the literal expected value.
    RawMatchesLiteral,
    /// The named and literal expected values are the same value.
    NamedMatchesLiteral,
    /// Applying the row's policy to the named expected value leaves it unchanged.
    NamedIsStable,
}

impl AssertionKind {
    /// The construction style under test.
    pub fn style(&self) -> ConstructionStyle {
        match self {
            AssertionKind::RawMatchesNamed | AssertionKind::NamedIsStable => {
                ConstructionStyle::Named
            }
            AssertionKind::RawMatchesLiteral | AssertionKind::NamedMatchesLiteral => {
                ConstructionStyle::Literal
            }
        }
    }
}

impl Display for AssertionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssertionKind::RawMatchesNamed => write!(f, "raw == named"),
            AssertionKind::RawMatchesLiteral => write!(f, "raw == literal"),
            AssertionKind::NamedMatchesLiteral => write!(f, "named == literal"),
            AssertionKind::NamedIsStable => write!(f, "named is stable"),
        }
    }
}

/// One side of an assertion: an expression and the policy it is constructed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    expression: Expression,
    precision: Precision,
}

impl Operand {
    fn new(expression: &Expression, precision: Precision) -> Self {
        Self {
            expression: expression.clone(),
            precision,
        }
    }

    /// The expression to construct.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// The precision policy it is constructed under.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    fn render(&self, cast: &str) -> String {
        if self.precision.is_exact() {
            format!("{}{cast}", self.expression)
        } else {
            format!("{}{cast} under {}", self.expression, self.precision)
        }
    }
}

/// A single equality check produced from one sample of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    class: String,
    cast: String,
    model: CoordinateModel,
    precision: Precision,
    coordinate_system: CoordinateSystem,
    sample: usize,
    kind: AssertionKind,
    lhs: Operand,
    rhs: Operand,
}

impl Assertion {
    /// Name of the geometry class.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Coordinate model of the row.
    pub fn model(&self) -> CoordinateModel {
        self.model
    }

    /// Precision policy of the row.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Reference system of the row.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// 1-based sample index within the row.
    pub fn sample(&self) -> usize {
        self.sample
    }

    /// Which equality is checked.
    pub fn kind(&self) -> AssertionKind {
        self.kind
    }

    /// Left operand.
    pub fn lhs(&self) -> &Operand {
        &self.lhs
    }

    /// Right operand.
    pub fn rhs(&self) -> &Operand {
        &self.rhs
    }

    /// The check as target-library source, with element casts applied for non-generic classes.
    pub fn render(&self) -> String {
        format!(
            "{} == {}",
            self.lhs.render(&self.cast),
            self.rhs.render(&self.cast)
        )
    }

    /// Construct both operands with `library` and compare them.
    pub fn evaluate<L: GeometryLibrary>(&self, library: &L) -> Result<(), AssertionFailure> {
        trace!(class = %self.class, sample = self.sample, kind = %self.kind, "evaluating");

        let lhs = self.construct(library, &self.lhs)?;
        let rhs = self.construct(library, &self.rhs)?;
        if library.equals(&lhs, &rhs) {
            Ok(())
        } else {
            Err(self.failure(format!("constructed {lhs:?}, expected {rhs:?}")))
        }
    }

    fn construct<L: GeometryLibrary>(
        &self,
        library: &L,
        operand: &Operand,
    ) -> Result<L::Geometry, AssertionFailure> {
        let construction = Construction::new(
            operand.expression.model(),
            operand.precision,
            self.coordinate_system,
        );
        library
            .construct(operand.expression.element(), &construction)
            .map_err(|err| self.failure(err.to_string()))
    }

    fn failure(&self, reason: String) -> AssertionFailure {
        AssertionFailure {
            class: self.class.clone(),
            model: self.model,
            precision: self.precision,
            sample: self.sample,
            kind: self.kind,
            lhs: self.lhs.render(&self.cast),
            rhs: self.rhs.render(&self.cast),
            reason,
        }
    }
}

/// Expand one row into its assertions: four per sample, or two when the sample has no literal
/// form.
///
/// Fails with [`MalformedRow`][crate::MatrixError::MalformedRow] if the row breaks an invariant.
pub fn expand(class: &GeometryClassSpec, row: &VariantRow) -> MatrixResult<Vec<Assertion>> {
    row.validate(class).map_err(|err| match err {
        MatrixError::MalformedRow { class: name, reason } => MatrixError::MalformedRow {
            reason: format!("{}: {reason}", row.suite_name(class)),
            class: name,
        },
        err => err,
    })?;

    let policy = row.precision();
    let exact = Precision::Floating;
    let mut assertions = Vec::with_capacity(8);

    for (i, sample) in row.samples().iter().enumerate() {
        let assertion = |kind, lhs, rhs| Assertion {
            class: class.name().to_string(),
            cast: class.element_cast(),
            model: row.coordinate_model(),
            precision: policy,
            coordinate_system: row.coordinate_system(),
            sample: i + 1,
            kind,
            lhs,
            rhs,
        };

        let raw = Operand::new(sample.raw(), policy);
        let named = Operand::new(sample.named(), exact);

        assertions.push(assertion(
            AssertionKind::RawMatchesNamed,
            raw.clone(),
            named.clone(),
        ));
        if let Some(literal) = sample.literal() {
            let literal = Operand::new(literal, exact);
            assertions.push(assertion(
                AssertionKind::RawMatchesLiteral,
                raw,
                literal.clone(),
            ));
            assertions.push(assertion(
                AssertionKind::NamedMatchesLiteral,
                named.clone(),
                literal,
            ));
        }
        assertions.push(assertion(
            AssertionKind::NamedIsStable,
            Operand::new(sample.named(), policy),
            named,
        ));
    }

    debug!(
        suite = %row.suite_name(class),
        assertions = assertions.len(),
        "expanded row"
    );
    Ok(assertions)
}

/// Outcome of evaluating a set of assertions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationReport {
    /// Number of assertions that held.
    pub passed: usize,
    /// Assertions that did not hold.
    pub failures: Vec<AssertionFailure>,
}

impl VerificationReport {
    /// Whether every assertion held.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of assertions evaluated.
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    fn merge(&mut self, other: VerificationReport) {
        self.passed += other.passed;
        self.failures.extend(other.failures);
    }
}

/// Drives [`expand`] over a [`VariantTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    include_disabled: bool,
}

impl Expander {
    /// An expander that skips disabled rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also expand rows marked as disabled.
    pub fn with_disabled(self, include_disabled: bool) -> Self {
        Self { include_disabled }
    }

    /// Expand one row. See [`expand`].
    pub fn expand(
        &self,
        class: &GeometryClassSpec,
        row: &VariantRow,
    ) -> MatrixResult<Vec<Assertion>> {
        expand(class, row)
    }

    fn selected_rows<'a>(
        &'a self,
        table: &'a VariantTable,
        class: &'a GeometryClassSpec,
    ) -> impl Iterator<Item = &'a VariantRow> + 'a {
        table.rows(class).iter().filter(move |row| {
            let selected = self.include_disabled || row.is_enabled();
            if !selected {
                debug!(suite = %row.suite_name(class), "skipping disabled row");
            }
            selected
        })
    }

    /// Expand every selected row of `class`, stopping at the first malformed row.
    pub fn expand_class(
        &self,
        table: &VariantTable,
        class: &GeometryClassSpec,
    ) -> MatrixResult<Vec<Assertion>> {
        let mut assertions = vec![];
        for row in self.selected_rows(table, class) {
            assertions.extend(self.expand(class, row)?);
        }
        Ok(assertions)
    }

    /// Expand every class of `table`.
    pub fn expand_table(&self, table: &VariantTable) -> MatrixResult<Vec<Assertion>> {
        let mut assertions = vec![];
        for class in table.classes() {
            assertions.extend(self.expand_class(table, class)?);
        }
        Ok(assertions)
    }

    /// Expand every class of `table` in parallel. The result is in table order.
    #[cfg(feature = "rayon")]
    pub fn expand_table_par(&self, table: &VariantTable) -> MatrixResult<Vec<Assertion>> {
        use rayon::prelude::*;

        let classes: Vec<&GeometryClassSpec> = table.classes().collect();
        let per_class = classes
            .par_iter()
            .map(|class| self.expand_class(table, class))
            .collect::<MatrixResult<Vec<_>>>()?;
        Ok(per_class.into_iter().flatten().collect())
    }

    /// Expand and evaluate every selected row of `class` against `library`.
    ///
    /// Assertion failures are collected, not returned early; a malformed row is still an error.
    pub fn verify_class<L: GeometryLibrary>(
        &self,
        table: &VariantTable,
        class: &GeometryClassSpec,
        library: &L,
    ) -> MatrixResult<VerificationReport> {
        let mut report = VerificationReport::default();
        for assertion in self.expand_class(table, class)? {
            match assertion.evaluate(library) {
                Ok(()) => report.passed += 1,
                Err(failure) => {
                    warn!("{failure}");
                    report.failures.push(failure);
                }
            }
        }
        Ok(report)
    }

    /// [`verify_class`][Self::verify_class] for every class of `table`.
    pub fn verify_table<L: GeometryLibrary>(
        &self,
        table: &VariantTable,
        library: &L,
    ) -> MatrixResult<VerificationReport> {
        let mut report = VerificationReport::default();
        for class in table.classes() {
            report.merge(self.verify_class(table, class, library)?);
        }
        Ok(report)
    }

    /// The class constructed from both samples' expected values, written in `style`.
    ///
    /// Samples without a literal form fall back to their named form. Non-generic classes get
    /// the element array cast.
    pub fn collection_expression(
        &self,
        class: &GeometryClassSpec,
        row: &VariantRow,
        style: ConstructionStyle,
    ) -> String {
        let element = |sample: &Sample| -> String {
            match style {
                ConstructionStyle::Named => sample.named().to_string(),
                ConstructionStyle::Literal => sample
                    .literal()
                    .unwrap_or_else(|| sample.named())
                    .to_string(),
            }
        };
        let elements = row.samples().iter().map(element).join(", ");
        let type_name = if class.is_generic() {
            format!("{}<{}>", class.name(), row.coordinate_model())
        } else {
            class.name().to_string()
        };
        format!(
            "{type_name}(elements: [{elements}]{}, precision: {}, coordinateSystem: {})",
            class.element_array_cast(),
            row.precision(),
            row.coordinate_system()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::library::ReferenceLibrary;
    use crate::test::rows;
    use crate::{Coord, Element};

    #[test]
    fn eight_assertions_per_row() {
        let assertions = expand(&GeometryClassSpec::multi_point(), &rows::scenario_a()).unwrap();
        assert_eq!(assertions.len(), 8);

        let kinds: Vec<_> = assertions.iter().take(4).map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            [
                AssertionKind::RawMatchesNamed,
                AssertionKind::RawMatchesLiteral,
                AssertionKind::NamedMatchesLiteral,
                AssertionKind::NamedIsStable,
            ]
        );
        assert!(assertions[..4].iter().all(|a| a.sample() == 1));
        assert!(assertions[4..].iter().all(|a| a.sample() == 2));
    }

    #[test]
    fn missing_literal_skips_literal_checks() {
        let row = rows::without_literals(rows::scenario_a());
        let assertions = expand(&GeometryClassSpec::multi_point(), &row).unwrap();
        assert_eq!(assertions.len(), 4);
        assert!(assertions
            .iter()
            .all(|a| a.kind().style() == ConstructionStyle::Named));
    }

    #[test]
    fn scenario_a_rounds_planar_point() {
        let assertions = expand(&GeometryClassSpec::multi_point(), &rows::scenario_a()).unwrap();
        for assertion in &assertions {
            assertion.evaluate(&ReferenceLibrary).unwrap();
        }
        assert_eq!(
            assertions[0].render(),
            "Point<Coordinate2D>(coordinate: (x: 1.001, y: 1.001)) under FixedPrecision(scale: 100) == Point<Coordinate2D>(coordinate: (x: 1.0, y: 1.0))"
        );
    }

    #[test]
    fn scenario_b_rounds_measure() {
        let class = GeometryClassSpec::multi_line_string();
        for assertion in expand(&class, &rows::scenario_b()).unwrap() {
            assertion.evaluate(&ReferenceLibrary).unwrap();
        }
    }

    #[test]
    fn scenario_c_collection_needs_casts() {
        let class = GeometryClassSpec::geometry_collection();
        let row = rows::scenario_c();
        let assertions = expand(&class, &row).unwrap();
        assert_eq!(assertions.len(), 8);
        for assertion in &assertions {
            assertion.evaluate(&ReferenceLibrary).unwrap();
        }

        let literal_check = assertions
            .iter()
            .find(|a| a.kind() == AssertionKind::NamedMatchesLiteral)
            .unwrap();
        assert!(literal_check
            .render()
            .ends_with("as GeometryCollection.Element"));

        let collection = Expander::new().collection_expression(&class, &row, ConstructionStyle::Literal);
        assert!(collection.starts_with("GeometryCollection(elements: [Polygon<Coordinate2D>(["));
        assert!(collection.contains("] as [GeometryCollection.Element], precision: FloatingPrecision"));
    }

    #[test]
    fn generic_collection_expression() {
        let class = GeometryClassSpec::multi_point();
        let row = rows::scenario_a();
        assert_eq!(
            Expander::new().collection_expression(&class, &row, ConstructionStyle::Literal),
            "MultiPoint<Coordinate2D>(elements: [Point<Coordinate2D>(x: 1.0, y: 1.0), Point<Coordinate2D>(x: 2.0, y: 2.0)], precision: FixedPrecision(scale: 100), coordinateSystem: Cartesian())"
        );
    }

    #[test]
    fn wrong_expectation_is_reported() {
        let model = CoordinateModel::XY;
        let raw = Expression::named(model, Element::Point(Coord::xy(1.006, 1.0)));
        let expected = Element::Point(Coord::xy(1.0, 1.0));
        let sample = Sample::new(
            raw,
            Expression::named(model, expected.clone()),
            Some(Expression::literal(model, expected)),
        );
        let row = VariantRow::new(
            model,
            Precision::fixed(100),
            [sample, rows::scenario_a().samples()[1].clone()],
        );
        let table = VariantTable::new()
            .with_class(GeometryClassSpec::multi_point(), [row])
            .unwrap();

        let report = Expander::new()
            .verify_table(&table, &ReferenceLibrary)
            .unwrap();
        assert_eq!(report.total(), 8);
        assert_eq!(report.failures.len(), 2);
        assert!(!report.is_success());

        let failure = &report.failures[0];
        assert_eq!(failure.class, "MultiPoint");
        assert_eq!(failure.sample, 1);
        assert_eq!(failure.kind, AssertionKind::RawMatchesNamed);
        assert_eq!(failure.precision, Precision::fixed(100));
        assert!(failure.to_string().contains("sample 1 raw == named"), "{failure}");
        assert_eq!(report.failures[1].kind, AssertionKind::RawMatchesLiteral);
    }

    #[test]
    fn unstable_expectation_is_reported() {
        let model = CoordinateModel::XY;
        let point = Expression::named(model, Element::Point(Coord::xy(1.004, 1.0)));
        let sample = Sample::new(point.clone(), point, None);
        let row = VariantRow::new(
            model,
            Precision::fixed(100),
            [sample, rows::scenario_a().samples()[1].clone()],
        );
        let assertions = expand(&GeometryClassSpec::multi_point(), &row).unwrap();
        let failed: Vec<_> = assertions
            .iter()
            .filter_map(|a| a.evaluate(&ReferenceLibrary).err())
            .map(|failure| failure.kind)
            .collect();
        assert_eq!(
            failed,
            [AssertionKind::RawMatchesNamed, AssertionKind::NamedIsStable]
        );
    }

    #[test]
    fn malformed_row_is_an_error() {
        let row = VariantRow::new(
            CoordinateModel::XY,
            Precision::fixed(0),
            rows::scenario_a().samples().clone(),
        );
        let err = expand(&GeometryClassSpec::multi_point(), &row).unwrap_err();
        assert!(matches!(err, MatrixError::MalformedRow { .. }));
        assert_eq!(
            err.to_string(),
            "Malformed row for MultiPoint: MultiPoint_Coordinate2D_FixedPrecision_Cartesian_Tests: fixed precision scale must be positive, got 0"
        );

        let table = VariantTable::new()
            .with_class(GeometryClassSpec::multi_point(), [rows::scenario_a(), row])
            .unwrap();
        assert!(Expander::new().expand_table(&table).is_err());
        assert!(Expander::new()
            .verify_table(&table, &ReferenceLibrary)
            .is_err());
    }

    #[test]
    fn disabled_rows() {
        let class = GeometryClassSpec::multi_point();
        let table = VariantTable::new()
            .with_class(
                class.clone(),
                [rows::scenario_a(), rows::floating_xy_points().disabled()],
            )
            .unwrap();
        assert_eq!(Expander::new().expand_class(&table, &class).unwrap().len(), 8);
        assert_eq!(
            Expander::new()
                .with_disabled(true)
                .expand_class(&table, &class)
                .unwrap()
                .len(),
            16
        );
    }

    #[test]
    fn untested_class_expands_to_nothing() {
        let table = VariantTable::builtin();
        let assertions = Expander::new()
            .expand_class(&table, &GeometryClassSpec::multi_polygon())
            .unwrap();
        assert!(assertions.is_empty());
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VariantTable>();
        assert_send_sync::<Assertion>();
        assert_send_sync::<Expander>();
        assert_send_sync::<AssertionFailure>();
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_matches_sequential() {
        let table = VariantTable::builtin();
        let expander = Expander::new();
        assert_eq!(
            expander.expand_table_par(&table).unwrap(),
            expander.expand_table(&table).unwrap()
        );
    }
}
