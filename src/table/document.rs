//! JSON form of a [`VariantTable`].
//!
//! ```json
//! {
//!   "classes": [
//!     {
//!       "name": "MultiPoint",
//!       "generic": true,
//!       "element": "Point",
//!       "variants": [
//!         {
//!           "coordinate": "Coordinate2D",
//!           "precision": { "type": "fixed", "scale": 100 },
//!           "crs": "Cartesian",
//!           "samples": [
//!             {
//!               "raw": "Point<Coordinate2D>(coordinate: (x: 1.001, y: 1.001))",
//!               "named": "Point<Coordinate2D>(coordinate: (x: 1.0, y: 1.0))",
//!               "literal": "Point<Coordinate2D>(x: 1.0, y: 1.0)"
//!             },
//!             ...
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};
use crate::table::{ClassEntry, VariantRow, VariantTable};
use crate::GeometryClassSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TableDocument {
    classes: Vec<ClassDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassDocument {
    #[serde(flatten)]
    spec: GeometryClassSpec,
    #[serde(default)]
    variants: Vec<VariantRow>,
}

impl TryFrom<TableDocument> for VariantTable {
    type Error = MatrixError;

    fn try_from(value: TableDocument) -> MatrixResult<Self> {
        let mut table = VariantTable::new();
        for class in value.classes {
            table.insert(class.spec, class.variants)?;
        }
        Ok(table)
    }
}

impl From<VariantTable> for TableDocument {
    fn from(value: VariantTable) -> Self {
        let classes = value
            .classes
            .into_values()
            .map(|ClassEntry { spec, rows }| ClassDocument {
                spec,
                variants: rows,
            })
            .collect();
        Self { classes }
    }
}

impl VariantTable {
    /// Parse a table from its JSON form.
    pub fn from_json_str(json: &str) -> MatrixResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a table from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> MatrixResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> MatrixResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize this table to pretty-printed JSON.
    pub fn to_json_string(&self) -> MatrixResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::{CoordinateModel, Precision};

    const MULTI_POINT: &str = r#"{
        "classes": [
            {
                "name": "MultiPoint",
                "generic": true,
                "element": "Point",
                "variants": [
                    {
                        "coordinate": "Coordinate2D",
                        "precision": { "type": "fixed", "scale": 100 },
                        "crs": "Cartesian",
                        "samples": [
                            {
                                "raw": "Point<Coordinate2D>(coordinate: (x: 1.001, y: 1.001))",
                                "named": "Point<Coordinate2D>(coordinate: (x: 1.0, y: 1.0))",
                                "literal": "Point<Coordinate2D>(x: 1.0, y: 1.0)"
                            },
                            {
                                "raw": "Point<Coordinate2D>(coordinate: (x: 2.002, y: 2.002))",
                                "named": "Point<Coordinate2D>(coordinate: (x: 2.0, y: 2.0))"
                            }
                        ]
                    },
                    {
                        "coordinate": "Coordinate2DM",
                        "precision": { "type": "floating" },
                        "enabled": false,
                        "samples": [
                            {
                                "raw": "Point<Coordinate2DM>(coordinate: (x: 1.0, y: 1.0, m: 1.0))",
                                "named": "Point<Coordinate2DM>(coordinate: (x: 1.0, y: 1.0, m: 1.0))"
                            },
                            {
                                "raw": "Point<Coordinate2DM>(coordinate: (x: 2.0, y: 2.0, m: 2.0))",
                                "named": "Point<Coordinate2DM>(coordinate: (x: 2.0, y: 2.0, m: 2.0))"
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parse_document() {
        let table = VariantTable::from_json_str(MULTI_POINT).unwrap();
        let class = table.class("MultiPoint").unwrap().clone();
        assert_eq!(class, GeometryClassSpec::multi_point());

        let rows = table.rows(&class);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].precision(), Precision::fixed(100));
        assert!(rows[0].is_enabled());
        assert!(rows[0].samples()[0].literal().is_some());
        assert!(rows[0].samples()[1].literal().is_none());
        assert_eq!(rows[1].coordinate_model(), CoordinateModel::XYM);
        assert!(!rows[1].is_enabled());
    }

    #[test]
    fn json_round_trip_of_builtin() {
        let table = VariantTable::builtin();
        let json = table.to_json_string().unwrap();
        assert_eq!(VariantTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn bad_expression_is_a_json_error() {
        let json = MULTI_POINT.replace("(x: 1.0, y: 1.0)\"", "(x: 1.0)\"");
        let err = VariantTable::from_json_str(&json).unwrap_err();
        assert!(matches!(err, MatrixError::Json(_)));
        assert!(err.to_string().contains("Expected ','"), "{err}");
    }

    #[test]
    fn three_samples_are_rejected() {
        let json = r#"{"classes": [{"name": "MultiPoint", "generic": true, "variants": [
            {"coordinate": "Coordinate2D", "precision": {"type": "floating"}, "samples": [
                {"raw": "Point<Coordinate2D>(x: 1.0, y: 1.0)", "named": "Point<Coordinate2D>(x: 1.0, y: 1.0)"},
                {"raw": "Point<Coordinate2D>(x: 1.0, y: 1.0)", "named": "Point<Coordinate2D>(x: 1.0, y: 1.0)"},
                {"raw": "Point<Coordinate2D>(x: 1.0, y: 1.0)", "named": "Point<Coordinate2D>(x: 1.0, y: 1.0)"}
            ]}
        ]}]}"#;
        assert!(VariantTable::from_json_str(json).is_err());
    }

    #[test]
    fn repeated_class_appends_rows() {
        let json = r#"{"classes": [
            {"name": "MultiPoint", "generic": true, "element": "Point", "variants": []},
            {"name": "MultiPoint", "generic": true, "element": "Point"}
        ]}"#;
        let table = VariantTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn conflicting_class_is_an_error() {
        let json = r#"{"classes": [
            {"name": "MultiPoint", "generic": true, "element": "Point"},
            {"name": "MultiPoint", "generic": false}
        ]}"#;
        let err = VariantTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, MatrixError::Json(_)));
        assert!(
            err.to_string()
                .contains("Conflicting declarations for class MultiPoint"),
            "{err}"
        );
    }

    #[test]
    fn overflowing_ordinate_is_an_error() {
        let json = MULTI_POINT.replace("x: 2.002", "x: 2e999");
        let err = VariantTable::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("Non-finite number '2e999'"), "{err}");
    }

    #[test]
    fn from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MULTI_POINT.as_bytes()).unwrap();
        let table = VariantTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);

        let missing = VariantTable::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(MatrixError::IOError(_))));
    }
}
