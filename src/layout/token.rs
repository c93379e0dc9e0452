//! Field tokens
//!
//! Descriptor token: `<shape-prefix><length-or-nothing><layout-code>`
//! Bulk token:       `<shape-prefix><bulk-code><length-or-nothing>`
//!
//! The shape prefix is empty for scalars and tuple syntax for arrays. The
//! length is only present for text fields.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::column::Shape;
use crate::registry::ScalarType;

/// Renders one field of the layout descriptor.
pub fn render_token(shape: &Shape, scalar_type: ScalarType, item_size: usize) -> String {
    let prefix = shape.layout_prefix();
    if scalar_type.is_text() {
        format!("{}{}{}", prefix, item_size, scalar_type.layout_code())
    } else {
        format!("{}{}", prefix, scalar_type.layout_code())
    }
}

/// One field in the bulk (record-array) layout.
///
/// Carries the same information as the matching descriptor token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkField {
    shape: Shape,
    scalar_type: ScalarType,
    item_size: usize,
}

impl BulkField {
    pub fn new(shape: Shape, scalar_type: ScalarType, item_size: usize) -> Self {
        Self {
            shape,
            scalar_type,
            item_size,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Format code without the shape prefix (`i4`, `a16`)
    pub fn format(&self) -> String {
        if self.scalar_type.is_text() {
            format!("{}{}", self.scalar_type.bulk_code(), self.item_size)
        } else {
            self.scalar_type.bulk_code().to_string()
        }
    }
}

impl fmt::Display for BulkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.shape.layout_prefix(), self.format())
    }
}

impl Serialize for BulkField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
