//! Error types for rowlayout
//!
//! Every failure is a programmer-input error detected synchronously while a
//! column is constructed or a schema is compiled. Nothing is retried and no
//! partially built column or schema is ever returned alongside an error.
//!
//! Error codes:
//! - ROWLAYOUT_INVALID_SHAPE
//! - ROWLAYOUT_UNSUPPORTED_TYPE
//! - ROWLAYOUT_MISSING_LENGTH
//! - ROWLAYOUT_NOT_INDEXABLE
//! - ROWLAYOUT_INVALID_NAME
//! - ROWLAYOUT_INVALID_DEFAULT
//! - ROWLAYOUT_INVALID_ALIGNMENT
//! - ROWLAYOUT_INVALID_OPTION
//! - ROWLAYOUT_MALFORMED_DESCRIPTOR
//! - ROWLAYOUT_UNKNOWN_COLUMN
//! - ROWLAYOUT_MALFORMED_SCHEMA_FILE
//! - ROWLAYOUT_DUPLICATE_SCHEMA

use thiserror::Error;

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors raised while building columns and compiling schemas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Shape is zero, negative, overflowing or of rank > 32
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Unknown type name, unsupported byte width or no default rule
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Text column whose length cannot be resolved
    #[error("Missing length: {0}")]
    MissingLength(String),

    /// Indexing requested on a type that forbids it
    #[error("Type '{0}' does not support indexing")]
    NotIndexable(String),

    /// Column name fails identifier validity
    #[error("Invalid column name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Default value does not fit the column type
    #[error("Invalid default value: {0}")]
    InvalidDefault(String),

    /// Alignment marker is not one of `=`, `<`, `>`, `!`, `@`
    #[error("Invalid alignment marker '{0}'")]
    InvalidAlignment(char),

    /// Reserved-prefix configuration entry is not understood
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// Layout descriptor string does not parse
    #[error("Malformed descriptor '{descriptor}': {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    /// Lookup of a column that the schema does not contain
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Description file could not be read or decoded
    #[error("Malformed schema file '{path}': {reason}")]
    MalformedSchemaFile { path: String, reason: String },

    /// A schema with the same name is already registered
    #[error("Schema '{0}' is already registered")]
    DuplicateSchema(String),
}

impl LayoutError {
    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            LayoutError::InvalidShape(_) => "ROWLAYOUT_INVALID_SHAPE",
            LayoutError::UnsupportedType(_) => "ROWLAYOUT_UNSUPPORTED_TYPE",
            LayoutError::MissingLength(_) => "ROWLAYOUT_MISSING_LENGTH",
            LayoutError::NotIndexable(_) => "ROWLAYOUT_NOT_INDEXABLE",
            LayoutError::InvalidName { .. } => "ROWLAYOUT_INVALID_NAME",
            LayoutError::InvalidDefault(_) => "ROWLAYOUT_INVALID_DEFAULT",
            LayoutError::InvalidAlignment(_) => "ROWLAYOUT_INVALID_ALIGNMENT",
            LayoutError::InvalidOption { .. } => "ROWLAYOUT_INVALID_OPTION",
            LayoutError::MalformedDescriptor { .. } => "ROWLAYOUT_MALFORMED_DESCRIPTOR",
            LayoutError::UnknownColumn(_) => "ROWLAYOUT_UNKNOWN_COLUMN",
            LayoutError::MalformedSchemaFile { .. } => "ROWLAYOUT_MALFORMED_SCHEMA_FILE",
            LayoutError::DuplicateSchema(_) => "ROWLAYOUT_DUPLICATE_SCHEMA",
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed descriptor error
    pub fn malformed_descriptor(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::MalformedDescriptor {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed schema file error
    pub fn malformed_schema_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LayoutError::MalformedSchemaFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Prefixes the message with the column it concerns.
    ///
    /// Leaves name, option and file errors untouched since they already
    /// carry their subject.
    pub fn in_column(self, column: &str) -> Self {
        match self {
            LayoutError::InvalidShape(msg) => {
                LayoutError::InvalidShape(format!("column '{}': {}", column, msg))
            }
            LayoutError::UnsupportedType(msg) => {
                LayoutError::UnsupportedType(format!("column '{}': {}", column, msg))
            }
            LayoutError::MissingLength(msg) => {
                LayoutError::MissingLength(format!("column '{}': {}", column, msg))
            }
            LayoutError::InvalidDefault(msg) => {
                LayoutError::InvalidDefault(format!("column '{}': {}", column, msg))
            }
            other => other,
        }
    }
}
