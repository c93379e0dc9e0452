//! On-disk description format
//!
//! ```json
//! {
//!   "name": "particle",
//!   "options": {"align": "=", "check_validity": true},
//!   "columns": {
//!     "name":     {"type": "String", "length": 16},
//!     "pressure": {"type": "Float32", "shape": [2, 3], "pos": 2}
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::column::{ColumnOptions, ColumnSpec, DefaultValue, ShapeArg};
use crate::compiler::{ALIGN_OPTION, CHECK_VALIDITY_OPTION};
use crate::description::Description;
use crate::errors::{LayoutError, LayoutResult};
use crate::registry;

/// One description file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    pub name: String,
    #[serde(default)]
    pub options: FileOptions,
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnDef>,
}

/// Schema-level options, mapped onto `_v_` configuration entries
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOptions {
    #[serde(default)]
    pub align: Option<char>,
    #[serde(default)]
    pub check_validity: Option<bool>,
}

/// One column declaration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub shape: Option<ShapeArg>,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub pos: Option<i64>,
    #[serde(default)]
    pub indexed: bool,
    /// Text length; only valid for text types
    #[serde(default)]
    pub length: Option<usize>,
}

impl ColumnDef {
    /// Builds the column through the constructor matching its type.
    ///
    /// Text with an explicit `length` goes through [`ColumnSpec::string`];
    /// everything else through [`ColumnSpec::generic`].
    pub fn to_spec(&self) -> LayoutResult<ColumnSpec> {
        let scalar_type = registry::resolve(&self.type_name)?;

        let options = ColumnOptions {
            shape: self.shape.clone(),
            default: self.default.clone(),
            position: self.pos,
            indexed: self.indexed,
        };

        match self.length {
            Some(length) if scalar_type.is_text() => ColumnSpec::string(Some(length), options),
            Some(_) => Err(LayoutError::invalid_option(
                "length",
                format!("only text columns take a length, not {}", scalar_type),
            )),
            None => ColumnSpec::generic(&self.type_name, options),
        }
    }
}

impl SchemaFile {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Collects the declared columns and options into a [`Description`]
    pub fn to_description(&self) -> LayoutResult<Description> {
        let mut description = Description::new();

        for (name, def) in &self.columns {
            let spec = def.to_spec().map_err(|e| e.in_column(name))?;
            description.add_column(name.as_str(), spec);
        }

        if let Some(marker) = self.options.align {
            description.set_option(ALIGN_OPTION, marker);
        }
        if let Some(check) = self.options.check_validity {
            description.set_option(CHECK_VALIDITY_OPTION, check);
        }

        Ok(description)
    }
}
