//! Declarative Collector
//!
//! A [`Description`] gathers the `name -> ColumnSpec` associations of one
//! record kind. It keeps them unordered; the compiler decides the order.
//!
//! Names are routed by prefix when they are added:
//! - `__name`: dropped
//! - `_v_name`: kept verbatim as schema-level configuration
//! - anything else: a column
//!
//! No other validation happens here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::column::ColumnSpec;
use crate::compiler::{CompiledSchema, SchemaCompiler};
use crate::errors::LayoutResult;
use crate::observability::{log_event_with_fields, Event};

/// Prefix of configuration entries
pub const CONFIG_PREFIX: &str = "_v_";

/// Prefix of entries that are never collected
pub const HIDDEN_PREFIX: &str = "__";

/// Configuration names owned by the compiled schema; a description may not set them
pub const INTERNAL_NAMES: [&str; 7] = [
    "_v_names",
    "_v_types",
    "_v_shapes",
    "_v_itemsizes",
    "_v_defaults",
    "_v_descriptor",
    "_v_bulk",
];

/// Plain value of a configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

impl From<char> for OptionValue {
    fn from(v: char) -> Self {
        OptionValue::Text(v.to_string())
    }
}

/// Anything that can be declared under a name
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionEntry {
    Column(ColumnSpec),
    Value(OptionValue),
}

impl From<ColumnSpec> for DescriptionEntry {
    fn from(spec: ColumnSpec) -> Self {
        DescriptionEntry::Column(spec)
    }
}

impl From<OptionValue> for DescriptionEntry {
    fn from(value: OptionValue) -> Self {
        DescriptionEntry::Value(value)
    }
}

/// Collected column declarations of one record kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    columns: HashMap<String, ColumnSpec>,
    config: BTreeMap<String, DescriptionEntry>,
    /// Column names that were given a plain value instead of a column
    misplaced: Vec<String>,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry, routing it by name prefix. A repeated name replaces
    /// the earlier entry.
    pub fn add(&mut self, name: impl Into<String>, entry: impl Into<DescriptionEntry>) -> &mut Self {
        let name = name.into();
        let entry = entry.into();

        if name.starts_with(HIDDEN_PREFIX) {
            return self;
        }

        if name.starts_with(CONFIG_PREFIX) {
            if INTERNAL_NAMES.contains(&name.as_str()) {
                log_event_with_fields(
                    Event::OptionConflict,
                    &[("name", name.as_str()), ("reason", "reserved by the compiled schema")],
                );
                return self;
            }
            self.config.insert(name, entry);
            return self;
        }

        match entry {
            DescriptionEntry::Column(spec) => {
                self.misplaced.retain(|n| n != &name);
                self.columns.insert(name, spec);
            }
            DescriptionEntry::Value(_) => {
                self.columns.remove(&name);
                if !self.misplaced.contains(&name) {
                    self.misplaced.push(name);
                }
            }
        }
        self
    }

    pub fn add_column(&mut self, name: impl Into<String>, spec: ColumnSpec) -> &mut Self {
        self.add(name, spec)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.add(name, value.into())
    }

    /// Owned form of [`Description::add_column`] for chaining
    pub fn with_column(mut self, name: impl Into<String>, spec: ColumnSpec) -> Self {
        self.add_column(name, spec);
        self
    }

    /// Owned form of [`Description::set_option`] for chaining
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set_option(name, value);
        self
    }

    pub fn columns(&self) -> &HashMap<String, ColumnSpec> {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.get(name)
    }

    /// Configuration entries, verbatim
    pub fn config(&self) -> &BTreeMap<String, DescriptionEntry> {
        &self.config
    }

    pub fn option(&self, name: &str) -> Option<&DescriptionEntry> {
        self.config.get(name)
    }

    pub fn misplaced(&self) -> &[String] {
        &self.misplaced
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Compiles with default compiler options
    pub fn compile(&self) -> LayoutResult<CompiledSchema> {
        SchemaCompiler::new().compile(self)
    }
}

impl<S: Into<String>> FromIterator<(S, ColumnSpec)> for Description {
    fn from_iter<I: IntoIterator<Item = (S, ColumnSpec)>>(iter: I) -> Self {
        let mut description = Description::new();
        for (name, spec) in iter {
            description.add_column(name, spec);
        }
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnOptions;

    fn int_col() -> ColumnSpec {
        ColumnSpec::int32(ColumnOptions::new()).unwrap()
    }

    #[test]
    fn test_columns_collected() {
        let desc = Description::new()
            .with_column("x", int_col())
            .with_column("y", int_col());
        assert_eq!(desc.len(), 2);
        assert!(desc.column("x").is_some());
        assert!(desc.config().is_empty());
    }

    #[test]
    fn test_hidden_prefix_dropped() {
        let desc = Description::new()
            .with_column("__doc", int_col())
            .with_option("__module__", "tables");
        assert!(desc.is_empty());
        assert!(desc.config().is_empty());
    }

    #[test]
    fn test_config_prefix_kept_verbatim() {
        let mut desc = Description::new();
        desc.set_option("_v_align", '>').add_column("_v_extra", int_col());

        assert!(desc.is_empty());
        assert_eq!(
            desc.option("_v_align"),
            Some(&DescriptionEntry::Value(OptionValue::Text(">".into())))
        );
        assert!(matches!(desc.option("_v_extra"), Some(DescriptionEntry::Column(_))));
    }

    #[test]
    fn test_internal_names_rejected() {
        let desc = Description::new().with_option("_v_descriptor", "=i");
        assert!(desc.option("_v_descriptor").is_none());
    }

    #[test]
    fn test_value_under_column_name_is_misplaced() {
        let mut desc = Description::new();
        desc.set_option("x", 3i64);
        assert_eq!(desc.misplaced(), ["x".to_string()]);

        desc.add_column("x", int_col());
        assert!(desc.misplaced().is_empty());
        assert_eq!(desc.len(), 1);
    }

    #[test]
    fn test_repeated_name_replaces() {
        let float = ColumnSpec::float64(ColumnOptions::new()).unwrap();
        let desc = Description::new()
            .with_column("x", int_col())
            .with_column("x", float.clone());
        assert_eq!(desc.len(), 1);
        assert_eq!(desc.column("x"), Some(&float));
    }

    #[test]
    fn test_from_iterator() {
        let desc: Description = vec![("a", int_col()), ("b", int_col())].into_iter().collect();
        assert_eq!(desc.len(), 2);
    }
}
