//! The variant table: per geometry class, the ordered rows of coordinate model, precision
//! policy and reference system combinations, each with two samples.

mod builtin;
mod document;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};
use crate::expr::Expression;
use crate::{CoordinateModel, CoordinateSystem, GeometryClassSpec, Precision};

/// One sample of a row: the raw input and its expected normalized value, written in both
/// construction styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    raw: Expression,
    named: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    literal: Option<Expression>,
}

impl Sample {
    /// Construct a new sample from parts.
    pub fn new(raw: Expression, named: Expression, literal: Option<Expression>) -> Self {
        Self {
            raw,
            named,
            literal,
        }
    }

    /// The raw input expression.
    pub fn raw(&self) -> &Expression {
        &self.raw
    }

    /// The expected value in the named construction style.
    pub fn named(&self) -> &Expression {
        &self.named
    }

    /// The expected value in the literal construction style, if it applies to this sample.
    pub fn literal(&self) -> Option<&Expression> {
        self.literal.as_ref()
    }

    /// Every expression of the sample with a label for error messages.
    fn forms(&self) -> impl Iterator<Item = (&'static str, &Expression)> {
        [
            Some(("raw", &self.raw)),
            Some(("named", &self.named)),
            self.literal.as_ref().map(|literal| ("literal", literal)),
        ]
        .into_iter()
        .flatten()
    }
}

/// One coordinate model x precision policy x reference system combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRow {
    #[serde(rename = "coordinate")]
    coordinate_model: CoordinateModel,
    precision: Precision,
    #[serde(rename = "crs", default)]
    coordinate_system: CoordinateSystem,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    samples: [Sample; 2],
}

fn enabled_by_default() -> bool {
    true
}

impl VariantRow {
    /// Construct a new, enabled row in the Cartesian reference system.
    pub fn new(coordinate_model: CoordinateModel, precision: Precision, samples: [Sample; 2]) -> Self {
        Self {
            coordinate_model,
            precision,
            coordinate_system: CoordinateSystem::default(),
            enabled: true,
            samples,
        }
    }

    /// Change the underlying [`CoordinateSystem`]
    pub fn with_coordinate_system(self, coordinate_system: CoordinateSystem) -> Self {
        Self {
            coordinate_system,
            ..self
        }
    }

    /// Mark this row as declared but not exercised.
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    /// The coordinate model every sample uses.
    pub fn coordinate_model(&self) -> CoordinateModel {
        self.coordinate_model
    }

    /// The precision policy raw inputs are interpreted under.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The reference system.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Whether drivers should expand this row.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The two samples.
    pub fn samples(&self) -> &[Sample; 2] {
        &self.samples
    }

    /// Name of the generated test suite, e.g. `MultiPoint_Coordinate2D_FixedPrecision_Cartesian_Tests`.
    pub fn suite_name(&self, class: &GeometryClassSpec) -> String {
        format!(
            "{}_{}_{}_{}_Tests",
            class.name(),
            self.coordinate_model.type_name(),
            self.precision.type_name(),
            self.coordinate_system.type_name()
        )
    }

    /// Check the row's invariants against the class it belongs to.
    pub fn validate(&self, class: &GeometryClassSpec) -> MatrixResult<()> {
        let malformed = |reason: String| MatrixError::malformed(class.name(), reason);

        if let Precision::Fixed { scale } = self.precision {
            if scale <= 0 {
                return Err(malformed(format!(
                    "fixed precision scale must be positive, got {scale}"
                )));
            }
        }

        let [first, second] = &self.samples;
        if first.raw.model() != second.raw.model() {
            return Err(malformed(format!(
                "samples do not share a coordinate model ({} and {})",
                first.raw.model(),
                second.raw.model()
            )));
        }

        for (i, sample) in self.samples.iter().enumerate() {
            let index = i + 1;
            let kind = sample.raw.kind();
            if !class.accepts(kind) {
                return Err(malformed(format!(
                    "sample {index} is a {kind}, which {} cannot hold",
                    class.name()
                )));
            }

            for (form, expr) in sample.forms() {
                if expr.model() != self.coordinate_model {
                    return Err(malformed(format!(
                        "sample {index} {form} is declared {} but the row is {}",
                        expr.model(),
                        self.coordinate_model
                    )));
                }
                if expr.kind() != kind {
                    return Err(malformed(format!(
                        "sample {index} {form} is a {} but raw is a {kind}",
                        expr.kind()
                    )));
                }
                match expr.element().model() {
                    Ok(Some(model)) if model != expr.model() => {
                        return Err(malformed(format!(
                            "sample {index} {form} holds {model} coordinates but is declared {}",
                            expr.model()
                        )));
                    }
                    Ok(_) => {}
                    Err(err) => return Err(malformed(format!("sample {index} {form}: {err}"))),
                }
                if let Some(value) = expr
                    .element()
                    .coords()
                    .flat_map(|coord| coord.ordinates())
                    .find(|value| !value.is_finite())
                {
                    return Err(malformed(format!(
                        "sample {index} {form} has non-finite ordinate {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ClassEntry {
    spec: GeometryClassSpec,
    rows: Vec<VariantRow>,
}

/// Rows per geometry class, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "document::TableDocument", into = "document::TableDocument")]
pub struct VariantTable {
    classes: IndexMap<String, ClassEntry>,
}

impl VariantTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The matrix shipped with this crate.
    pub fn builtin() -> Self {
        builtin::table()
    }

    /// Add rows for `class`, appending to any rows already registered under its name.
    ///
    /// Fails with [`ConflictingClass`][MatrixError::ConflictingClass] if a class of the same name
    /// is registered with a different generic flag or element kind.
    pub fn insert(
        &mut self,
        class: GeometryClassSpec,
        rows: impl IntoIterator<Item = VariantRow>,
    ) -> MatrixResult<()> {
        let entry = self
            .classes
            .entry(class.name().to_string())
            .or_insert_with(|| ClassEntry {
                spec: class.clone(),
                rows: vec![],
            });
        if entry.spec != class {
            return Err(MatrixError::ConflictingClass(class.name().to_string()));
        }
        entry.rows.extend(rows);
        Ok(())
    }

    /// Builder-style [`insert`][Self::insert].
    pub fn with_class(
        mut self,
        class: GeometryClassSpec,
        rows: impl IntoIterator<Item = VariantRow>,
    ) -> MatrixResult<Self> {
        self.insert(class, rows)?;
        Ok(self)
    }

    /// All rows declared for `class`, enabled or not.
    ///
    /// Classes are matched on the whole description, not only the name. A class without declared
    /// coverage yields an empty slice.
    pub fn rows(&self, class: &GeometryClassSpec) -> &[VariantRow] {
        self.classes
            .get(class.name())
            .filter(|entry| entry.spec == *class)
            .map(|entry| entry.rows.as_slice())
            .unwrap_or_default()
    }

    /// The rows of `class` drivers should expand.
    pub fn enabled_rows<'a>(
        &'a self,
        class: &GeometryClassSpec,
    ) -> impl Iterator<Item = &'a VariantRow> + 'a {
        self.rows(class).iter().filter(|row| row.is_enabled())
    }

    /// Registered classes, in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &GeometryClassSpec> {
        self.classes.values().map(|entry| &entry.spec)
    }

    /// Look up a registered class by name.
    pub fn class(&self, name: &str) -> Option<&GeometryClassSpec> {
        self.classes.get(name).map(|entry| &entry.spec)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
