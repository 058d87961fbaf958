use serde::{Deserialize, Serialize};

use crate::ElementKind;

/// Description of one geometry class under test.
///
/// Generic classes (multi-element types) are parameterized by a coordinate model and hold a
/// single element kind. Non-generic classes (mixed-geometry collections) hold any element, so
/// their elements must be narrowed with a cast before they can be compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryClassSpec {
    name: String,
    #[serde(rename = "generic")]
    is_generic: bool,
    #[serde(rename = "element", default, skip_serializing_if = "Option::is_none")]
    element_kind: Option<ElementKind>,
}

impl GeometryClassSpec {
    /// Construct a new class description from parts.
    pub fn new(name: impl Into<String>, is_generic: bool, element_kind: Option<ElementKind>) -> Self {
        Self {
            name: name.into(),
            is_generic,
            element_kind,
        }
    }

    /// `MultiPoint`, a generic class of points.
    pub fn multi_point() -> Self {
        Self::new("MultiPoint", true, Some(ElementKind::Point))
    }

    /// `MultiLineString`, a generic class of line strings.
    pub fn multi_line_string() -> Self {
        Self::new("MultiLineString", true, Some(ElementKind::LineString))
    }

    /// `MultiPolygon`, a generic class of polygons.
    pub fn multi_polygon() -> Self {
        Self::new("MultiPolygon", true, Some(ElementKind::Polygon))
    }

    /// `GeometryCollection`, a heterogeneous collection.
    pub fn geometry_collection() -> Self {
        Self::new("GeometryCollection", false, None)
    }

    /// Class identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the class is parameterized by a coordinate model.
    pub fn is_generic(&self) -> bool {
        self.is_generic
    }

    /// The element kind a homogeneous class holds, or `None` if it accepts any kind.
    pub fn element_kind(&self) -> Option<ElementKind> {
        self.element_kind
    }

    /// Whether an element of `kind` can be stored in this class.
    pub fn accepts(&self, kind: ElementKind) -> bool {
        self.element_kind.map_or(true, |held| held == kind)
    }

    /// `<Name>.Element`
    pub fn element_type_name(&self) -> String {
        format!("{}.Element", self.name)
    }

    /// Cast narrowing a single element, empty for generic classes.
    pub fn element_cast(&self) -> String {
        if self.is_generic {
            String::new()
        } else {
            format!(" as {}", self.element_type_name())
        }
    }

    /// Cast narrowing an array of elements, empty for generic classes.
    pub fn element_array_cast(&self) -> String {
        if self.is_generic {
            String::new()
        } else {
            format!(" as [{}]", self.element_type_name())
        }
    }
}
