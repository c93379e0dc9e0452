//! Column Specification subsystem
//!
//! Validates and normalizes the attributes of one declared column: element
//! type, shape, item size, default value, explicit position and indexing
//! hint. Construction is pure and a [`ColumnSpec`] never changes afterwards.

mod shape;
mod spec;
mod value;

pub use shape::{Shape, ShapeArg, MAX_RANK};
pub use spec::{ColumnOptions, ColumnSpec};
pub use value::{Complex, DefaultValue};
