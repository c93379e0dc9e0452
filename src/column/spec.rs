//! Column specifications
//!
//! One validating constructor per column kind. A [`ColumnSpec`] has no name;
//! the description that holds it assigns one.
//!
//! Construction checks, in order:
//! 1. shape (zero, negative or rank > 32 fails `InvalidShape`)
//! 2. byte width (unsupported widths fail `UnsupportedType`)
//! 3. text length (unresolvable fails `MissingLength`)
//! 4. default value against the type (`InvalidDefault`)
//! 5. indexing (complex types fail `NotIndexable`)

use std::fmt;

use super::shape::{Shape, ShapeArg};
use super::value::DefaultValue;
use crate::errors::{LayoutError, LayoutResult};
use crate::layout::{render_token, BulkField};
use crate::registry::{self, ScalarType};

/// Attributes shared by every column kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOptions {
    pub shape: Option<ShapeArg>,
    pub default: Option<DefaultValue>,
    pub position: Option<i64>,
    pub indexed: bool,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: impl Into<ShapeArg>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn pos(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    fn normalized_shape(&self) -> LayoutResult<Shape> {
        match &self.shape {
            Some(shape) => shape.normalize(),
            None => Ok(Shape::Scalar),
        }
    }
}

/// Immutable, fully resolved description of one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    scalar_type: ScalarType,
    shape: Shape,
    /// Element size in bytes; the full run length for text.
    item_size: usize,
    default: Option<DefaultValue>,
    position: Option<i64>,
    indexed: bool,
}

impl ColumnSpec {
    /// Generic constructor taking a type name from the registry.
    ///
    /// For text types the trailing dimension of the declared shape is the
    /// text length and the remaining dimensions form the array shape
    /// (see [`ShapeArg::split_text`]), so an array of fixed-length strings
    /// is declared as `[.., length]`. With no shape the length comes from
    /// the default value.
    pub fn generic(type_name: &str, options: ColumnOptions) -> LayoutResult<Self> {
        let scalar_type = registry::resolve(type_name)?;

        if scalar_type.is_text() {
            let (shape, length) = match &options.shape {
                Some(shape) => shape.split_text()?,
                None => (Shape::Scalar, length_from_default(options.default.as_ref())?),
            };
            return Self::finish(scalar_type, shape, length, options);
        }

        let shape = options.normalized_shape()?;
        Self::finish(scalar_type, shape, scalar_type.byte_width(), options)
    }

    /// Boolean column, 1 byte per element
    pub fn bool(options: ColumnOptions) -> LayoutResult<Self> {
        let shape = options.normalized_shape()?;
        Self::finish(ScalarType::Bool, shape, 1, options)
    }

    /// Integer column of `width` bytes (1, 2, 4 or 8)
    pub fn int(width: usize, signed: bool, options: ColumnOptions) -> LayoutResult<Self> {
        let shape = options.normalized_shape()?;
        let scalar_type = ScalarType::integer(width, signed)?;
        Self::finish(scalar_type, shape, width, options)
    }

    pub fn int8(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(1, true, options)
    }

    pub fn uint8(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(1, false, options)
    }

    pub fn int16(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(2, true, options)
    }

    pub fn uint16(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(2, false, options)
    }

    pub fn int32(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(4, true, options)
    }

    pub fn uint32(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(4, false, options)
    }

    pub fn int64(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(8, true, options)
    }

    pub fn uint64(options: ColumnOptions) -> LayoutResult<Self> {
        Self::int(8, false, options)
    }

    /// Float column of `width` bytes (4 or 8)
    pub fn float(width: usize, options: ColumnOptions) -> LayoutResult<Self> {
        let shape = options.normalized_shape()?;
        let scalar_type = ScalarType::float(width)?;
        Self::finish(scalar_type, shape, width, options)
    }

    pub fn float32(options: ColumnOptions) -> LayoutResult<Self> {
        Self::float(4, options)
    }

    pub fn float64(options: ColumnOptions) -> LayoutResult<Self> {
        Self::float(8, options)
    }

    /// Complex column of `width` bytes (8 or 16). Never indexable.
    pub fn complex(width: usize, options: ColumnOptions) -> LayoutResult<Self> {
        let shape = options.normalized_shape()?;
        let scalar_type = ScalarType::complex(width)?;
        Self::finish(scalar_type, shape, width, options)
    }

    pub fn complex32(options: ColumnOptions) -> LayoutResult<Self> {
        Self::complex(8, options)
    }

    pub fn complex64(options: ColumnOptions) -> LayoutResult<Self> {
        Self::complex(16, options)
    }

    /// Fixed-length text column.
    ///
    /// Without an explicit `length` the length of a non-empty default is
    /// used. The shape is the array-of-strings shape and is not split.
    pub fn string(length: Option<usize>, options: ColumnOptions) -> LayoutResult<Self> {
        let shape = options.normalized_shape()?;
        let length = match length {
            Some(0) => {
                return Err(LayoutError::MissingLength(
                    "text length must be greater than 0".into(),
                ))
            }
            Some(length) => length,
            None => length_from_default(options.default.as_ref())?,
        };
        Self::finish(ScalarType::Text, shape, length, options)
    }

    fn finish(
        scalar_type: ScalarType,
        shape: Shape,
        item_size: usize,
        options: ColumnOptions,
    ) -> LayoutResult<Self> {
        if let Some(default) = &options.default {
            default.check_for(scalar_type, item_size)?;
        }

        if options.indexed && !scalar_type.is_indexable() {
            return Err(LayoutError::NotIndexable(scalar_type.name().to_string()));
        }

        Ok(Self {
            scalar_type,
            shape,
            item_size,
            default: options.default,
            position: options.position,
            indexed: options.indexed,
        })
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Explicitly declared default, if any
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn position(&self) -> Option<i64> {
        self.position
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Token for this column in the layout descriptor
    pub fn layout_token(&self) -> String {
        render_token(&self.shape, self.scalar_type, self.item_size)
    }

    /// Token for this column in the bulk record-array form
    pub fn bulk_field(&self) -> BulkField {
        BulkField::new(self.shape.clone(), self.scalar_type, self.item_size)
    }
}

fn length_from_default(default: Option<&DefaultValue>) -> LayoutResult<usize> {
    match default.and_then(DefaultValue::as_text) {
        Some(text) if !text.is_empty() => Ok(text.len()),
        _ => Err(LayoutError::MissingLength(
            "a text column needs a length or a non-empty default to infer it from".into(),
        )),
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Text reports its full declared shape, run length included
        let shape = if self.scalar_type.is_text() {
            let mut dims = self.shape.dims().to_vec();
            dims.push(self.item_size);
            Shape::Fixed(dims).to_string()
        } else {
            self.shape.to_string()
        };
        let dflt = match &self.default {
            Some(value) => value.to_string(),
            None => "None".to_string(),
        };
        let pos = match self.position {
            Some(pos) => pos.to_string(),
            None => "None".to_string(),
        };
        write!(
            f,
            "Col(dtype='{}', shape={}, dflt={}, pos={}, indexed={})",
            self.scalar_type, shape, dflt, pos, self.indexed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int32_scalar() {
        let col = ColumnSpec::int32(ColumnOptions::new()).unwrap();
        assert_eq!(col.scalar_type(), ScalarType::Int32);
        assert_eq!(col.shape(), &Shape::Scalar);
        assert_eq!(col.item_size(), 4);
        assert_eq!(col.layout_token(), "i");
        assert!(col.default_value().is_none());
    }

    #[test]
    fn test_unsupported_widths() {
        assert_eq!(
            ColumnSpec::int(3, true, ColumnOptions::new()).unwrap_err().code(),
            "ROWLAYOUT_UNSUPPORTED_TYPE"
        );
        assert!(ColumnSpec::float(2, ColumnOptions::new()).is_err());
        assert!(ColumnSpec::complex(32, ColumnOptions::new()).is_err());
    }

    #[test]
    fn test_shape_checked_before_width() {
        let err = ColumnSpec::int(3, true, ColumnOptions::new().shape(0)).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_SHAPE");
    }

    #[test]
    fn test_float_array_token() {
        let col = ColumnSpec::float64(ColumnOptions::new().shape([2, 3])).unwrap();
        assert_eq!(col.shape(), &Shape::Fixed(vec![2, 3]));
        assert_eq!(col.layout_token(), "(2, 3)d");
        assert_eq!(col.bulk_field().to_string(), "(2, 3)f8");
    }

    #[test]
    fn test_string_explicit_length() {
        let col = ColumnSpec::string(Some(16), ColumnOptions::new()).unwrap();
        assert_eq!(col.item_size(), 16);
        assert_eq!(col.shape(), &Shape::Scalar);
        assert_eq!(col.layout_token(), "16s");
        assert_eq!(col.bulk_field().to_string(), "a16");
    }

    #[test]
    fn test_string_length_from_default() {
        let col = ColumnSpec::string(None, ColumnOptions::new().default_value("hello")).unwrap();
        assert_eq!(col.item_size(), 5);
    }

    #[test]
    fn test_string_without_length_or_default() {
        let err = ColumnSpec::string(None, ColumnOptions::new()).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_MISSING_LENGTH");

        let err = ColumnSpec::string(None, ColumnOptions::new().default_value("")).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_MISSING_LENGTH");

        let err = ColumnSpec::string(Some(0), ColumnOptions::new()).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_MISSING_LENGTH");
    }

    #[test]
    fn test_string_array_keeps_shape() {
        let col = ColumnSpec::string(Some(5), ColumnOptions::new().shape(3)).unwrap();
        assert_eq!(col.shape(), &Shape::Fixed(vec![3]));
        assert_eq!(col.layout_token(), "(3,)5s");
        assert_eq!(col.bulk_field().to_string(), "(3,)a5");
    }

    #[test]
    fn test_generic_text_pops_length() {
        let col = ColumnSpec::generic("CharType", ColumnOptions::new().shape([4, 2, 8])).unwrap();
        assert_eq!(col.scalar_type(), ScalarType::Text);
        assert_eq!(col.shape(), &Shape::Fixed(vec![4, 2]));
        assert_eq!(col.item_size(), 8);
        assert_eq!(col.layout_token(), "(4, 2)8s");

        let col = ColumnSpec::generic("String", ColumnOptions::new().shape(12)).unwrap();
        assert_eq!(col.shape(), &Shape::Scalar);
        assert_eq!(col.item_size(), 12);
    }

    #[test]
    fn test_generic_text_without_shape_uses_default() {
        let col = ColumnSpec::generic("String", ColumnOptions::new().default_value("abc")).unwrap();
        assert_eq!(col.item_size(), 3);
        assert!(ColumnSpec::generic("String", ColumnOptions::new()).is_err());
    }

    #[test]
    fn test_generic_numeric() {
        let col = ColumnSpec::generic("UInt16", ColumnOptions::new().shape(2)).unwrap();
        assert_eq!(col.scalar_type(), ScalarType::UInt16);
        assert_eq!(col.layout_token(), "(2,)H");
        assert_eq!(
            ColumnSpec::generic("Quaternion", ColumnOptions::new()).unwrap_err().code(),
            "ROWLAYOUT_UNSUPPORTED_TYPE"
        );
    }

    #[test]
    fn test_complex_not_indexable() {
        let err = ColumnSpec::complex64(ColumnOptions::new().indexed(true)).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_NOT_INDEXABLE");
        let err = ColumnSpec::generic("Complex32", ColumnOptions::new().indexed(true)).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_NOT_INDEXABLE");
        assert!(ColumnSpec::float32(ColumnOptions::new().indexed(true))
            .unwrap()
            .is_indexed());
    }

    #[test]
    fn test_bool_column() {
        let col = ColumnSpec::bool(ColumnOptions::new().default_value(true)).unwrap();
        assert_eq!(col.item_size(), 1);
        assert_eq!(col.layout_token(), "c");
        assert_eq!(col.bulk_field().to_string(), "b1");
    }

    #[test]
    fn test_default_must_fit() {
        let err = ColumnSpec::int8(ColumnOptions::new().default_value("x")).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_DEFAULT");
    }

    #[test]
    fn test_display() {
        let col = ColumnSpec::int32(ColumnOptions::new().shape(2).default_value(0).pos(3)).unwrap();
        assert_eq!(
            col.to_string(),
            "Col(dtype='Int32', shape=(2,), dflt=0, pos=3, indexed=false)"
        );

        let col = ColumnSpec::string(Some(2), ColumnOptions::new().default_value(" ")).unwrap();
        assert_eq!(
            col.to_string(),
            "Col(dtype='String', shape=(2,), dflt=' ', pos=None, indexed=false)"
        );
    }
}
