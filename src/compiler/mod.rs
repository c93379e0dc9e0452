//! Schema Compiler
//!
//! Turns a [`Description`] into a [`CompiledSchema`]:
//!
//! 1. Resolve settings from [`CompileOptions`] and `_v_` configuration
//! 2. Order the columns deterministically
//! 3. Validate names (unless disabled)
//! 4. Fill derived defaults
//! 5. Render the layout descriptor and the bulk form
//!
//! Ordering: when any column carries an explicit position, positioned
//! columns come first by `(position, name)` and the rest follow by name.
//! Otherwise columns are ordered by name alone. Equal positions are
//! accepted and broken by name.
//!
//! A successful compile has no side effects beyond logging.

mod options;
mod schema;

pub use options::{CompileOptions, ALIGN_OPTION, CHECK_VALIDITY_OPTION};
pub use schema::{CompiledColumn, CompiledSchema};

use std::collections::BTreeMap;

use crate::column::{ColumnSpec, DefaultValue};
use crate::description::Description;
use crate::errors::{LayoutError, LayoutResult};
use crate::naming::{check_name, NameKind};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use options::Settings;

/// Compiles descriptions into schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    options: CompileOptions,
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn compile(&self, description: &Description) -> LayoutResult<CompiledSchema> {
        if let Some(name) = description.misplaced().first() {
            return Err(LayoutError::UnsupportedType(format!(
                "entry '{}' is not a column specification",
                name
            )));
        }

        let settings = Settings::resolve(&self.options, description)?;
        let ordered = order_columns(description);
        warn_duplicate_positions(&ordered);

        let mut descriptor = String::new();
        descriptor.push(settings.alignment.marker());
        let mut bulk = Vec::with_capacity(ordered.len());
        let mut columns = Vec::with_capacity(ordered.len());

        for (name, spec) in ordered {
            if settings.check_names && check_name(name)? == NameKind::Natural {
                log_event_with_fields(Event::NaturalName, &[("name", name)]);
            }

            let default = match spec.default_value() {
                Some(value) => value.clone(),
                None => DefaultValue::zero_for(spec.scalar_type()),
            };

            descriptor.push_str(&spec.layout_token());
            bulk.push(spec.bulk_field());
            columns.push(CompiledColumn::new(name, spec.clone(), default));
        }

        let schema = CompiledSchema::new(
            columns,
            settings.alignment,
            descriptor,
            bulk,
            description.config().clone(),
        );

        if Logger::enabled(Severity::Trace) {
            let count = schema.len().to_string();
            log_event_with_fields(
                Event::SchemaCompiled,
                &[("columns", count.as_str()), ("descriptor", schema.descriptor())],
            );
        }

        Ok(schema)
    }
}

/// Compiles `description` with `options`
pub fn compile(description: &Description, options: CompileOptions) -> LayoutResult<CompiledSchema> {
    SchemaCompiler::with_options(options).compile(description)
}

fn order_columns(description: &Description) -> Vec<(&str, &ColumnSpec)> {
    let mut entries: Vec<(&str, &ColumnSpec)> = description
        .columns()
        .iter()
        .map(|(name, spec)| (name.as_str(), spec))
        .collect();

    let any_positioned = entries.iter().any(|(_, spec)| spec.position().is_some());
    if any_positioned {
        // None sorts after every Some
        entries.sort_by(|(a_name, a), (b_name, b)| {
            let a_key = (a.position().is_none(), a.position(), *a_name);
            let b_key = (b.position().is_none(), b.position(), *b_name);
            a_key.cmp(&b_key)
        });
    } else {
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
    entries
}

fn warn_duplicate_positions(ordered: &[(&str, &ColumnSpec)]) {
    let mut by_position: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
    for &(name, spec) in ordered {
        if let Some(pos) = spec.position() {
            by_position.entry(pos).or_default().push(name);
        }
    }

    for (pos, names) in by_position.into_iter().filter(|(_, n)| n.len() > 1) {
        let pos = pos.to_string();
        let names = names.join(",");
        log_event_with_fields(
            Event::DuplicatePosition,
            &[("pos", pos.as_str()), ("columns", names.as_str())],
        );
    }
}
