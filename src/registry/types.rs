//! Scalar element types
//!
//! Supported element kinds:
//! - Bool: 1 byte
//! - Int8..Int64 / UInt8..UInt64: 1, 2, 4 or 8 bytes
//! - Float32 / Float64: 4 or 8 bytes
//! - Complex32 / Complex64: 8 or 16 bytes (two floats)
//! - Text: fixed-length byte run, 1 byte per character
//!
//! Each type carries a one-character layout code (descriptor language) and a
//! bulk format code (record-array construction).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LayoutError, LayoutResult};

/// Broad category of a scalar type, used by default derivation and
/// default-value checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    Complex,
    Text,
}

/// Element type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    /// Single precision complex, 8 bytes
    Complex32,
    /// Double precision complex, 16 bytes
    Complex64,
    /// Fixed-length text; the run length lives on the column
    #[serde(rename = "String")]
    Text,
}

impl ScalarType {
    /// Every scalar type, in registry order
    pub const ALL: [ScalarType; 14] = [
        ScalarType::Bool,
        ScalarType::Int8,
        ScalarType::UInt8,
        ScalarType::Int16,
        ScalarType::UInt16,
        ScalarType::Int32,
        ScalarType::UInt32,
        ScalarType::Int64,
        ScalarType::UInt64,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Complex32,
        ScalarType::Complex64,
        ScalarType::Text,
    ];

    /// Resolves an integer type from its byte width and signedness.
    pub fn integer(width: usize, signed: bool) -> LayoutResult<Self> {
        let ty = match (width, signed) {
            (1, true) => ScalarType::Int8,
            (1, false) => ScalarType::UInt8,
            (2, true) => ScalarType::Int16,
            (2, false) => ScalarType::UInt16,
            (4, true) => ScalarType::Int32,
            (4, false) => ScalarType::UInt32,
            (8, true) => ScalarType::Int64,
            (8, false) => ScalarType::UInt64,
            _ => {
                return Err(LayoutError::UnsupportedType(format!(
                    "integer width {} is not one of 1, 2, 4 or 8",
                    width
                )))
            }
        };
        Ok(ty)
    }

    /// Resolves a float type from its byte width.
    pub fn float(width: usize) -> LayoutResult<Self> {
        match width {
            4 => Ok(ScalarType::Float32),
            8 => Ok(ScalarType::Float64),
            _ => Err(LayoutError::UnsupportedType(format!(
                "float width {} is not one of 4 or 8",
                width
            ))),
        }
    }

    /// Resolves a complex type from its total byte width.
    pub fn complex(width: usize) -> LayoutResult<Self> {
        match width {
            8 => Ok(ScalarType::Complex32),
            16 => Ok(ScalarType::Complex64),
            _ => Err(LayoutError::UnsupportedType(format!(
                "complex width {} is not one of 8 or 16",
                width
            ))),
        }
    }

    /// Returns the canonical type name
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "Bool",
            ScalarType::Int8 => "Int8",
            ScalarType::UInt8 => "UInt8",
            ScalarType::Int16 => "Int16",
            ScalarType::UInt16 => "UInt16",
            ScalarType::Int32 => "Int32",
            ScalarType::UInt32 => "UInt32",
            ScalarType::Int64 => "Int64",
            ScalarType::UInt64 => "UInt64",
            ScalarType::Float32 => "Float32",
            ScalarType::Float64 => "Float64",
            ScalarType::Complex32 => "Complex32",
            ScalarType::Complex64 => "Complex64",
            ScalarType::Text => "String",
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            ScalarType::Bool => TypeKind::Bool,
            ScalarType::Int8 | ScalarType::Int16 | ScalarType::Int32 | ScalarType::Int64 => {
                TypeKind::SignedInt
            }
            ScalarType::UInt8 | ScalarType::UInt16 | ScalarType::UInt32 | ScalarType::UInt64 => {
                TypeKind::UnsignedInt
            }
            ScalarType::Float32 | ScalarType::Float64 => TypeKind::Float,
            ScalarType::Complex32 | ScalarType::Complex64 => TypeKind::Complex,
            ScalarType::Text => TypeKind::Text,
        }
    }

    /// Size of one element in bytes (one character for text)
    pub fn byte_width(&self) -> usize {
        match self {
            ScalarType::Bool | ScalarType::Int8 | ScalarType::UInt8 | ScalarType::Text => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => 4,
            ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Float64 => 8,
            ScalarType::Complex32 => 8,
            ScalarType::Complex64 => 16,
        }
    }

    /// Natural alignment of one element under native (`@`) alignment
    pub fn alignment(&self) -> usize {
        match self.kind() {
            TypeKind::Complex => self.byte_width() / 2,
            _ => self.byte_width(),
        }
    }

    /// One-character code used in the layout descriptor
    pub fn layout_code(&self) -> char {
        match self {
            ScalarType::Bool => 'c',
            ScalarType::Int8 => 'b',
            ScalarType::UInt8 => 'B',
            ScalarType::Int16 => 'h',
            ScalarType::UInt16 => 'H',
            ScalarType::Int32 => 'i',
            ScalarType::UInt32 => 'I',
            ScalarType::Int64 => 'q',
            ScalarType::UInt64 => 'Q',
            ScalarType::Float32 => 'f',
            ScalarType::Float64 => 'd',
            ScalarType::Complex32 => 'F',
            ScalarType::Complex64 => 'D',
            ScalarType::Text => 's',
        }
    }

    /// Format code used for bulk record-array construction.
    ///
    /// Text is `a`, followed by the run length when rendered in a field.
    pub fn bulk_code(&self) -> &'static str {
        match self {
            ScalarType::Bool => "b1",
            ScalarType::Int8 => "i1",
            ScalarType::UInt8 => "u1",
            ScalarType::Int16 => "i2",
            ScalarType::UInt16 => "u2",
            ScalarType::Int32 => "i4",
            ScalarType::UInt32 => "u4",
            ScalarType::Int64 => "i8",
            ScalarType::UInt64 => "u8",
            ScalarType::Float32 => "f4",
            ScalarType::Float64 => "f8",
            ScalarType::Complex32 => "c8",
            ScalarType::Complex64 => "c16",
            ScalarType::Text => "a",
        }
    }

    /// Complex columns cannot be indexed
    pub fn is_indexable(&self) -> bool {
        self.kind() != TypeKind::Complex
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ScalarType::Text)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
