//! Layout descriptor strings
//!
//! A descriptor is one alignment marker followed by one token per field:
//!
//! ```text
//! descriptor := marker token*
//! marker     := '=' | '@' | '<' | '>' | '!'
//! token      := [ '(' dim { ',' dim } [','] ')' ] [ count ] code
//! ```
//!
//! For text (`s`) the count is the run length. For other codes a count with
//! no tuple prefix is read as a rank-one shape, the way repeat counts work in
//! struct-style format strings.

use serde::Serialize;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::column::{Shape, ShapeArg};
use crate::errors::{LayoutError, LayoutResult};
use crate::registry::{self, Alignment, ScalarType};

use super::token::render_token;

/// One field recovered from, or rendered into, a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    shape: Shape,
    scalar_type: ScalarType,
    item_size: usize,
}

impl FieldLayout {
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

    /// Bytes occupied by the field: element count times item size
    pub fn byte_size(&self) -> LayoutResult<usize> {
        self.shape
            .element_count()?
            .checked_mul(self.item_size)
            .ok_or_else(|| LayoutError::InvalidShape(format!("field {} overflows", self.token())))
    }

    /// Alignment of the field under native alignment
    pub fn alignment(&self) -> usize {
        self.scalar_type.alignment()
    }

    pub fn token(&self) -> String {
        render_token(&self.shape, self.scalar_type, self.item_size)
    }
}

/// Parsed form of a layout descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutDescriptor {
    alignment: Alignment,
    fields: Vec<FieldLayout>,
}

impl LayoutDescriptor {
    pub fn new(alignment: Alignment, fields: Vec<FieldLayout>) -> Self {
        Self { alignment, fields }
    }

    /// Parses a descriptor string back into fields, using the registry's
    /// inverse code mapping.
    pub fn parse(descriptor: &str) -> LayoutResult<Self> {
        let mut chars = descriptor.chars().peekable();

        let marker = chars
            .next()
            .ok_or_else(|| LayoutError::malformed_descriptor(descriptor, "empty descriptor"))?;
        let alignment = Alignment::from_marker(marker).map_err(|_| {
            LayoutError::malformed_descriptor(
                descriptor,
                format!("expected an alignment marker, found '{}'", marker),
            )
        })?;

        let mut fields = Vec::new();
        while chars.peek().is_some() {
            let field = parse_field(&mut chars).map_err(|reason| {
                LayoutError::malformed_descriptor(
                    descriptor,
                    format!("field {}: {}", fields.len(), reason),
                )
            })?;
            fields.push(field);
        }

        Ok(Self { alignment, fields })
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field types in descriptor order
    pub fn scalar_types(&self) -> Vec<ScalarType> {
        self.fields.iter().map(|f| f.scalar_type).collect()
    }

    /// Byte offset of each field within a record
    pub fn offsets(&self) -> LayoutResult<Vec<usize>> {
        self.walk().map(|(offsets, _)| offsets)
    }

    /// Total bytes of one record, trailing padding included
    pub fn record_size(&self) -> LayoutResult<usize> {
        self.walk().map(|(_, size)| size)
    }

    fn walk(&self) -> LayoutResult<(Vec<usize>, usize)> {
        let pad = self.alignment.pads_fields();
        let mut offsets = Vec::with_capacity(self.fields.len());
        let mut cursor = 0usize;
        let mut widest = 1usize;

        for field in &self.fields {
            if pad {
                cursor = align_up(cursor, field.alignment())?;
                widest = widest.max(field.alignment());
            }
            offsets.push(cursor);
            cursor = cursor
                .checked_add(field.byte_size()?)
                .ok_or_else(|| LayoutError::InvalidShape("record size overflows".into()))?;
        }

        if pad {
            cursor = align_up(cursor, widest)?;
        }

        Ok((offsets, cursor))
    }
}

impl fmt::Display for LayoutDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alignment.marker())?;
        for field in &self.fields {
            write!(f, "{}", field.token())?;
        }
        Ok(())
    }
}

fn align_up(offset: usize, alignment: usize) -> LayoutResult<usize> {
    let rem = offset % alignment;
    if rem == 0 {
        return Ok(offset);
    }
    offset
        .checked_add(alignment - rem)
        .ok_or_else(|| LayoutError::InvalidShape("record size overflows".into()))
}

fn parse_field(chars: &mut Peekable<Chars<'_>>) -> Result<FieldLayout, String> {
    let dims = if chars.peek() == Some(&'(') {
        chars.next();
        Some(parse_dims(chars)?)
    } else {
        None
    };
    let count = parse_number(chars)?;
    let code = chars
        .next()
        .ok_or_else(|| "token ends without a layout code".to_string())?;
    let scalar_type =
        registry::from_layout_code(code).ok_or_else(|| format!("unknown layout code '{}'", code))?;

    if scalar_type.is_text() {
        let length = count.unwrap_or(1);
        if length == 0 {
            return Err("text length must be greater than 0".into());
        }
        let shape = match dims {
            Some(dims) => dims_to_shape(dims)?,
            None => Shape::Scalar,
        };
        return Ok(FieldLayout::new(shape, scalar_type, length));
    }

    let shape = match (dims, count) {
        (Some(dims), None) => dims_to_shape(dims)?,
        (None, None) => Shape::Scalar,
        (None, Some(count)) => {
            let count = i64::try_from(count).map_err(|_| format!("count {} is too large", count))?;
            ShapeArg::Int(count).normalize().map_err(|e| e.to_string())?
        }
        (Some(_), Some(count)) => {
            return Err(format!(
                "count {} after an array shape is only valid for text",
                count
            ))
        }
    };

    Ok(FieldLayout::new(shape, scalar_type, scalar_type.byte_width()))
}

fn parse_dims(chars: &mut Peekable<Chars<'_>>) -> Result<Vec<usize>, String> {
    let mut body = String::new();
    loop {
        match chars.next() {
            Some(')') => break,
            Some(c) => body.push(c),
            None => return Err("unterminated shape".into()),
        }
    }

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parts: Vec<&str> = body.split(',').map(str::trim).collect();
    // "(2,)" leaves one trailing empty part
    if parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }

    parts
        .into_iter()
        .map(|p| {
            p.parse::<usize>()
                .map_err(|_| format!("invalid dimension '{}'", p))
        })
        .collect()
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Result<Option<usize>, String> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let current = value.unwrap_or(0);
        value = Some(
            current
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .ok_or_else(|| "number overflows".to_string())?,
        );
    }
    Ok(value)
}

fn dims_to_shape(dims: Vec<usize>) -> Result<Shape, String> {
    let dims: Vec<i64> = dims
        .into_iter()
        .map(|d| i64::try_from(d).map_err(|_| format!("dimension {} is too large", d)))
        .collect::<Result<_, _>>()?;
    ShapeArg::Dims(dims).normalize().map_err(|e| e.to_string())
}
