//! Observable events for rowlayout
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A schema compiled successfully
    SchemaCompiled,
    /// Two or more columns share an explicit position
    DuplicatePosition,
    /// A column name is valid but not a plain identifier
    NaturalName,
    /// A reserved-prefix entry was dropped or overridden
    OptionConflict,
    /// Description files loaded from a directory
    SchemasLoaded,
    /// A description file failed to load
    SchemaLoadFailed,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaCompiled => "SCHEMA_COMPILED",
            Event::DuplicatePosition => "DUPLICATE_POSITION",
            Event::NaturalName => "NATURAL_NAME",
            Event::OptionConflict => "OPTION_CONFLICT",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaLoadFailed => "SCHEMA_LOAD_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaCompiled => Severity::Trace,
            Event::SchemasLoaded => Severity::Info,
            Event::DuplicatePosition | Event::NaturalName | Event::OptionConflict => {
                Severity::Warn
            }
            Event::SchemaLoadFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
