//! Compiled schemas
//!
//! A [`CompiledSchema`] is produced once by the compiler and is read-only
//! afterwards. It is `Send + Sync` and may be shared by any number of
//! readers, e.g. behind an `Arc`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::column::{ColumnSpec, DefaultValue, Shape};
use crate::description::DescriptionEntry;
use crate::errors::{LayoutError, LayoutResult};
use crate::layout::{BulkField, FieldLayout, LayoutDescriptor};
use crate::registry::{Alignment, ScalarType};

/// One column of a compiled schema
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledColumn {
    name: String,
    spec: ColumnSpec,
    /// Declared default, or the one derived from the type
    default: DefaultValue,
}

impl CompiledColumn {
    pub(crate) fn new(name: impl Into<String>, spec: ColumnSpec, default: DefaultValue) -> Self {
        Self {
            name: name.into(),
            spec,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.spec.scalar_type()
    }

    pub fn shape(&self) -> &Shape {
        self.spec.shape()
    }

    pub fn item_size(&self) -> usize {
        self.spec.item_size()
    }

    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    pub fn is_indexed(&self) -> bool {
        self.spec.is_indexed()
    }

    pub fn field_layout(&self) -> FieldLayout {
        FieldLayout::new(self.shape().clone(), self.scalar_type(), self.item_size())
    }
}

impl Serialize for CompiledColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompiledColumn", 8)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.scalar_type())?;
        state.serialize_field("shape", self.shape())?;
        state.serialize_field("item_size", &self.item_size())?;
        state.serialize_field("default", &self.default)?;
        state.serialize_field("pos", &self.spec.position())?;
        state.serialize_field("indexed", &self.is_indexed())?;
        state.serialize_field("token", &self.spec.layout_token())?;
        state.end()
    }
}

/// Ordered, validated set of columns for one record kind
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    names: Vec<String>,
    columns: Vec<CompiledColumn>,
    index: HashMap<String, usize>,
    alignment: Alignment,
    descriptor: String,
    bulk: Vec<BulkField>,
    config: BTreeMap<String, DescriptionEntry>,
}

impl CompiledSchema {
    pub(crate) fn new(
        columns: Vec<CompiledColumn>,
        alignment: Alignment,
        descriptor: String,
        bulk: Vec<BulkField>,
        config: BTreeMap<String, DescriptionEntry>,
    ) -> Self {
        let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            columns,
            index,
            alignment,
            descriptor,
            bulk,
            config,
        }
    }

    /// Column names in compiled order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[CompiledColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&CompiledColumn> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Like [`CompiledSchema::column`], failing `UnknownColumn`
    pub fn get_column(&self, name: &str) -> LayoutResult<&CompiledColumn> {
        self.column(name)
            .ok_or_else(|| LayoutError::UnknownColumn(name.to_string()))
    }

    pub fn column_type(&self, name: &str) -> Option<ScalarType> {
        self.column(name).map(CompiledColumn::scalar_type)
    }

    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.column(name).map(CompiledColumn::shape)
    }

    pub fn item_size(&self, name: &str) -> Option<usize> {
        self.column(name).map(CompiledColumn::item_size)
    }

    pub fn default_value(&self, name: &str) -> Option<&DefaultValue> {
        self.column(name).map(CompiledColumn::default_value)
    }

    /// Name to type map
    pub fn types(&self) -> BTreeMap<&str, ScalarType> {
        self.columns
            .iter()
            .map(|c| (c.name(), c.scalar_type()))
            .collect()
    }

    /// Name to default map
    pub fn defaults(&self) -> BTreeMap<&str, &DefaultValue> {
        self.columns
            .iter()
            .map(|c| (c.name(), c.default_value()))
            .collect()
    }

    /// Name to shape map
    pub fn shapes(&self) -> BTreeMap<&str, &Shape> {
        self.columns.iter().map(|c| (c.name(), c.shape())).collect()
    }

    /// Name to item size map
    pub fn item_sizes(&self) -> BTreeMap<&str, usize> {
        self.columns
            .iter()
            .map(|c| (c.name(), c.item_size()))
            .collect()
    }

    /// Names of indexed columns, in compiled order
    pub fn indexed_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_indexed())
            .map(CompiledColumn::name)
            .collect()
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Layout descriptor string, alignment marker included
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Bulk (record-array) form, one field per column
    pub fn bulk_fields(&self) -> &[BulkField] {
        &self.bulk
    }

    /// Bulk fields rendered as format strings
    pub fn bulk_formats(&self) -> Vec<String> {
        self.bulk.iter().map(|f| f.to_string()).collect()
    }

    /// Structured form of the descriptor
    pub fn layout(&self) -> LayoutDescriptor {
        LayoutDescriptor::new(
            self.alignment,
            self.columns.iter().map(CompiledColumn::field_layout).collect(),
        )
    }

    /// Bytes per record under the schema's alignment
    pub fn record_size(&self) -> LayoutResult<usize> {
        self.layout().record_size()
    }

    /// Configuration entries carried over from the description
    pub fn config(&self) -> &BTreeMap<String, DescriptionEntry> {
        &self.config
    }
}

impl fmt::Display for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{}({}, {})",
                column.name(),
                column.scalar_type(),
                column.shape()
            )?;
        }
        write!(f, "]")
    }
}

impl Serialize for CompiledSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompiledSchema", 5)?;
        state.serialize_field("names", &self.names)?;
        state.serialize_field("alignment", &self.alignment)?;
        state.serialize_field("descriptor", &self.descriptor)?;
        state.serialize_field("bulk", &self.bulk)?;
        state.serialize_field("columns", &self.columns)?;
        state.end()
    }
}
