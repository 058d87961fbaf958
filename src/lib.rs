//! A conformance matrix for geometry libraries that store coordinates under a precision policy.
//!
//! For every geometry class, a [`VariantTable`] lists rows of coordinate model, precision policy
//! and reference system, each with two samples. The [`Expander`] turns every row into
//! assertions that raw input, once constructed under the row's policy, equals the expected
//! normalized value written in both construction styles.
//!
//! ```
//! use geomatrix::{Expander, ReferenceLibrary, VariantTable};
//!
//! let table = VariantTable::builtin();
//! let report = Expander::new().verify_table(&table, &ReferenceLibrary).unwrap();
//! assert!(report.is_success());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

mod class;
mod coord;
mod crs;
mod dimension;
mod element;
pub mod error;
mod expand;
pub mod expr;
mod library;
mod precision;
mod table;

pub use class::GeometryClassSpec;
pub use coord::Coord;
pub use crs::CoordinateSystem;
pub use dimension::CoordinateModel;
pub use element::{Element, ElementKind};
pub use error::{AssertionFailure, MatrixError, MatrixResult};
pub use expand::{expand, Assertion, AssertionKind, Expander, Operand, VerificationReport};
pub use expr::{ConstructionStyle, Expression};
pub use library::{Construction, GeometryLibrary, ReferenceLibrary};
pub use precision::Precision;
pub use table::{Sample, VariantRow, VariantTable};
