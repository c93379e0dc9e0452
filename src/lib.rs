//! rowlayout - compiles declarative column descriptions into binary record layouts
//!
//! A [`Description`] collects named [`ColumnSpec`]s. The [`SchemaCompiler`]
//! orders them deterministically and renders a compact layout descriptor
//! (`"=i(2, 3)d16s"`) plus the equivalent bulk record-array form.
//!
//! ```ignore
//! use rowlayout::{ColumnOptions, ColumnSpec, Description};
//!
//! let schema = Description::new()
//!     .with_column("ngroup", ColumnSpec::int32(ColumnOptions::new().pos(1))?)
//!     .with_column("ntable", ColumnSpec::int32(ColumnOptions::new().pos(2))?)
//!     .with_column("nrow", ColumnSpec::int32(ColumnOptions::new().pos(3))?)
//!     .compile()?;
//! assert_eq!(schema.descriptor(), "=iii");
//! ```

pub mod cli;
pub mod column;
pub mod compiler;
pub mod description;
pub mod errors;
pub mod layout;
pub mod loader;
pub mod naming;
pub mod observability;
pub mod registry;

pub use column::{ColumnOptions, ColumnSpec, Complex, DefaultValue, Shape, ShapeArg};
pub use compiler::{compile, CompileOptions, CompiledColumn, CompiledSchema, SchemaCompiler};
pub use description::{Description, DescriptionEntry, OptionValue};
pub use errors::{LayoutError, LayoutResult};
pub use layout::{BulkField, FieldLayout, LayoutDescriptor};
pub use loader::{SchemaFile, SchemaLoader};
pub use registry::{Alignment, ScalarType, TypeKind, TypeRegistry};
