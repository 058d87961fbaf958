//! Defines [`MatrixError`], representing all errors returned by this crate, and
//! [`AssertionFailure`], the per-assertion mismatch report.

use thiserror::Error;

use crate::expand::AssertionKind;
use crate::{CoordinateModel, Precision};

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatrixError {
    /// A variant row violates a table invariant. This is a defect in the test data, not in the
    /// library under test.
    #[error("Malformed row for {class}: {reason}")]
    MalformedRow {
        /// Name of the geometry class the row belongs to.
        class: String,
        /// What invariant the row violates.
        reason: String,
    },

    /// Expression text that does not follow the construction notation.
    #[error("Expression parse error: {0}")]
    Parse(String),

    /// A dimension with no matching coordinate model.
    #[error("Invalid coordinate dimension: {0}")]
    InvalidDimension(String),

    /// A class registered twice under one name with different descriptions.
    #[error("Conflicting declarations for class {0}")]
    ConflictingClass(String),

    /// A reference system the library declares but does not support.
    #[error("Unsupported coordinate system: {0}")]
    UnsupportedCoordinateSystem(String),

    /// The library under test refused to construct a value.
    #[error("Construction error: {0}")]
    Construction(String),

    /// [serde_json::Error]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl MatrixError {
    pub(crate) fn malformed(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            class: class.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-specific result type.
pub type MatrixResult<T> = std::result::Result<T, MatrixError>;

/// A single assertion whose two operands did not compare equal.
///
/// Carries enough context to localize the failing case without re-running the matrix.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "{class} {model} {precision} sample {sample} {kind}: {lhs} != {rhs} ({reason})"
)]
pub struct AssertionFailure {
    /// Name of the geometry class.
    pub class: String,
    /// Coordinate model of the row.
    pub model: CoordinateModel,
    /// Precision policy of the row.
    pub precision: Precision,
    /// 1-based sample index within the row.
    pub sample: usize,
    /// Which check failed.
    pub kind: AssertionKind,
    /// Rendered left operand.
    pub lhs: String,
    /// Rendered right operand.
    pub rhs: String,
    /// Why the check failed.
    pub reason: String,
}
