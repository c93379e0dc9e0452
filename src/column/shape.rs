//! Column element shapes
//!
//! A declared shape arrives as a [`ShapeArg`] (an integer or a sequence of
//! integers, possibly negative when it comes from a description file) and
//! normalizes into a [`Shape`]:
//!
//! - `1`, `[]` or absent: `Scalar`
//! - integer `n > 1`: `Fixed([n])`
//! - sequence: `Fixed(dims)`, kept as-is, so `[1]` stays `Fixed([1])`
//!
//! Every dimension must be positive and the rank may not exceed 32.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LayoutError, LayoutResult};

/// Largest rank the storage engine accepts
pub const MAX_RANK: usize = 32;

/// Normalized shape of one column element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "Vec<usize>")]
pub enum Shape {
    Scalar,
    Fixed(Vec<usize>),
}

impl Shape {
    /// Dimensions of the shape; empty for a scalar
    pub fn dims(&self) -> &[usize] {
        match self {
            Shape::Scalar => &[],
            Shape::Fixed(dims) => dims,
        }
    }

    pub fn rank(&self) -> usize {
        self.dims().len()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Shape::Scalar)
    }

    /// Number of elements, with overflow checked
    pub fn element_count(&self) -> LayoutResult<usize> {
        self.dims()
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                LayoutError::InvalidShape(format!("element count of {} overflows", self))
            })
    }

    /// Shape prefix for a layout token: empty for a scalar, tuple syntax
    /// otherwise (`(2,)`, `(2, 3)`).
    pub fn layout_prefix(&self) -> String {
        match self {
            Shape::Scalar => String::new(),
            Shape::Fixed(dims) => render_tuple(dims),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "1"),
            Shape::Fixed(dims) => write!(f, "{}", render_tuple(dims)),
        }
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Scalar => Vec::new(),
            Shape::Fixed(dims) => dims,
        }
    }
}

/// Renders dimensions in tuple syntax. A single dimension keeps its
/// trailing comma.
fn render_tuple(dims: &[usize]) -> String {
    match dims {
        [] => "()".to_string(),
        [one] => format!("({},)", one),
        many => {
            let parts: Vec<String> = many.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Shape as declared by the caller, before validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ShapeArg {
    Int(i64),
    Dims(Vec<i64>),
}

impl ShapeArg {
    /// Validates and normalizes into a [`Shape`].
    pub fn normalize(&self) -> LayoutResult<Shape> {
        match self {
            ShapeArg::Int(n) => {
                let n = positive(*n)?;
                if n == 1 {
                    Ok(Shape::Scalar)
                } else {
                    Ok(Shape::Fixed(vec![n]))
                }
            }
            ShapeArg::Dims(dims) => {
                let dims = validate_dims(dims)?;
                if dims.is_empty() {
                    Ok(Shape::Scalar)
                } else {
                    Ok(Shape::Fixed(dims))
                }
            }
        }
    }

    /// Splits a text column's declared shape into (array shape, run length).
    ///
    /// The trailing dimension is popped off and becomes the text length; the
    /// remaining dimensions are the array-of-strings shape. An integer shape
    /// is the length of a single string.
    pub fn split_text(&self) -> LayoutResult<(Shape, usize)> {
        match self {
            ShapeArg::Int(n) => Ok((Shape::Scalar, positive(*n)?)),
            ShapeArg::Dims(dims) => {
                let mut dims = validate_dims(dims)?;
                let length = dims.pop().ok_or_else(|| {
                    LayoutError::MissingLength(
                        "empty shape leaves no trailing dimension for the text length".into(),
                    )
                })?;
                let shape = if dims.is_empty() {
                    Shape::Scalar
                } else {
                    Shape::Fixed(dims)
                };
                Ok((shape, length))
            }
        }
    }
}

fn positive(n: i64) -> LayoutResult<usize> {
    if n < 1 {
        return Err(LayoutError::InvalidShape(format!(
            "shape value must be greater than 0: {}",
            n
        )));
    }
    usize::try_from(n).map_err(|_| LayoutError::InvalidShape(format!("shape value {} is too large", n)))
}

fn validate_dims(dims: &[i64]) -> LayoutResult<Vec<usize>> {
    if dims.len() > MAX_RANK {
        return Err(LayoutError::InvalidShape(format!(
            "shapes with rank {} > {} are not supported",
            dims.len(),
            MAX_RANK
        )));
    }
    dims.iter().map(|&d| positive(d)).collect()
}

impl From<i32> for ShapeArg {
    fn from(n: i32) -> Self {
        ShapeArg::Int(i64::from(n))
    }
}

impl From<i64> for ShapeArg {
    fn from(n: i64) -> Self {
        ShapeArg::Int(n)
    }
}

impl From<usize> for ShapeArg {
    fn from(n: usize) -> Self {
        ShapeArg::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<Vec<i64>> for ShapeArg {
    fn from(dims: Vec<i64>) -> Self {
        ShapeArg::Dims(dims)
    }
}

impl From<Vec<i32>> for ShapeArg {
    fn from(dims: Vec<i32>) -> Self {
        ShapeArg::Dims(dims.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<usize>> for ShapeArg {
    fn from(dims: Vec<usize>) -> Self {
        ShapeArg::Dims(
            dims.into_iter()
                .map(|d| i64::try_from(d).unwrap_or(i64::MAX))
                .collect(),
        )
    }
}

impl<const N: usize> From<[i32; N]> for ShapeArg {
    fn from(dims: [i32; N]) -> Self {
        ShapeArg::from(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for ShapeArg {
    fn from(dims: [usize; N]) -> Self {
        ShapeArg::from(dims.to_vec())
    }
}
