//! Compiler settings
//!
//! Settings come from two places: the description's `_v_` configuration
//! entries and the [`CompileOptions`] handed to the compiler. Explicit
//! options win; with neither, names are checked and alignment is `=`.

use crate::description::{Description, DescriptionEntry, OptionValue};
use crate::errors::{LayoutError, LayoutResult};
use crate::observability::{log_event_with_fields, Event};
use crate::registry::Alignment;

/// Configuration entry selecting the alignment marker
pub const ALIGN_OPTION: &str = "_v_align";

/// Configuration entry toggling name validation
pub const CHECK_VALIDITY_OPTION: &str = "_v_check_validity";

/// Caller-supplied compiler settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// `Some(false)` accepts invalid names without complaint
    pub check_names: Option<bool>,
    pub alignment: Option<Alignment>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_names(mut self, check: bool) -> Self {
        self.check_names = Some(check);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

/// Settings after merging options with the description's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub check_names: bool,
    pub alignment: Alignment,
}

impl Settings {
    pub(crate) fn resolve(options: &CompileOptions, description: &Description) -> LayoutResult<Self> {
        let mut configured_check = None;
        let mut configured_align = None;

        for (name, entry) in description.config() {
            match name.as_str() {
                ALIGN_OPTION => configured_align = Some(parse_alignment(name, entry)?),
                CHECK_VALIDITY_OPTION => configured_check = Some(parse_flag(name, entry)?),
                _ => return Err(LayoutError::invalid_option(name, "unknown option")),
            }
        }

        if options.alignment.is_some() && configured_align.is_some() {
            log_event_with_fields(
                Event::OptionConflict,
                &[("name", ALIGN_OPTION), ("reason", "overridden by compile options")],
            );
        }
        if options.check_names.is_some() && configured_check.is_some() {
            log_event_with_fields(
                Event::OptionConflict,
                &[("name", CHECK_VALIDITY_OPTION), ("reason", "overridden by compile options")],
            );
        }

        Ok(Self {
            check_names: options.check_names.or(configured_check).unwrap_or(true),
            alignment: options.alignment.or(configured_align).unwrap_or_default(),
        })
    }
}

fn parse_alignment(name: &str, entry: &DescriptionEntry) -> LayoutResult<Alignment> {
    match entry {
        DescriptionEntry::Value(OptionValue::Text(marker)) => Alignment::from_str_marker(marker),
        _ => Err(LayoutError::invalid_option(name, "expected a one-character marker")),
    }
}

fn parse_flag(name: &str, entry: &DescriptionEntry) -> LayoutResult<bool> {
    match entry {
        DescriptionEntry::Value(OptionValue::Bool(flag)) => Ok(*flag),
        DescriptionEntry::Value(OptionValue::Int(0)) => Ok(false),
        DescriptionEntry::Value(OptionValue::Int(1)) => Ok(true),
        _ => Err(LayoutError::invalid_option(name, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnOptions, ColumnSpec};

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&CompileOptions::new(), &Description::new()).unwrap();
        assert!(settings.check_names);
        assert_eq!(settings.alignment, Alignment::Standard);
    }

    #[test]
    fn test_description_config() {
        let desc = Description::new()
            .with_option(ALIGN_OPTION, "<")
            .with_option(CHECK_VALIDITY_OPTION, 0i64);
        let settings = Settings::resolve(&CompileOptions::new(), &desc).unwrap();
        assert!(!settings.check_names);
        assert_eq!(settings.alignment, Alignment::LittleEndian);
    }

    #[test]
    fn test_options_override_config() {
        let desc = Description::new().with_option(ALIGN_OPTION, "<");
        let options = CompileOptions::new().alignment(Alignment::Native);
        let settings = Settings::resolve(&options, &desc).unwrap();
        assert_eq!(settings.alignment, Alignment::Native);
    }

    #[test]
    fn test_bad_config_values() {
        let desc = Description::new().with_option(ALIGN_OPTION, true);
        let err = Settings::resolve(&CompileOptions::new(), &desc).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_OPTION");

        let desc = Description::new().with_option(ALIGN_OPTION, "?");
        let err = Settings::resolve(&CompileOptions::new(), &desc).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_ALIGNMENT");

        let desc = Description::new().with_option(CHECK_VALIDITY_OPTION, "yes");
        assert!(Settings::resolve(&CompileOptions::new(), &desc).is_err());
    }

    #[test]
    fn test_unknown_config_name() {
        let col = ColumnSpec::int8(ColumnOptions::new()).unwrap();
        let desc = Description::new().with_column("_v_extra", col);
        let err = Settings::resolve(&CompileOptions::new(), &desc).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_OPTION");
    }
}
