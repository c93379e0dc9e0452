//! Column name validity
//!
//! A pure predicate over a name string. Invalid names:
//! - empty, or `.`
//! - containing `/` or NUL
//! - starting with a reserved prefix (`__`, `_v_`, `_c_`, `_f_`, `_g_`)
//! - equal to a reserved attribute name
//!
//! Names that pass but are not plain identifiers are "natural names": they
//! are accepted, and the compiler warns about them.

use crate::errors::{LayoutError, LayoutResult};

/// Prefixes reserved for internal attributes
pub const RESERVED_PREFIXES: [&str; 5] = ["__", "_v_", "_c_", "_f_", "_g_"];

/// Attribute names owned by the description itself
pub const RESERVED_NAMES: [&str; 1] = ["columns"];

/// Outcome of a successful name check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// Valid, but not usable as a plain identifier
    Natural,
}

/// Checks a column name.
pub fn check_name(name: &str) -> LayoutResult<NameKind> {
    if name.is_empty() {
        return Err(LayoutError::invalid_name(name, "name is empty"));
    }
    if name == "." {
        return Err(LayoutError::invalid_name(name, "'.' is not a valid name"));
    }
    if name.contains('/') {
        return Err(LayoutError::invalid_name(name, "name contains '/'"));
    }
    if name.contains('\0') {
        return Err(LayoutError::invalid_name(name, "name contains a NUL character"));
    }
    if let Some(prefix) = reserved_prefix(name) {
        return Err(LayoutError::invalid_name(
            name,
            format!("prefix '{}' is reserved", prefix),
        ));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(LayoutError::invalid_name(name, "name is reserved"));
    }

    if is_identifier(name) {
        Ok(NameKind::Identifier)
    } else {
        Ok(NameKind::Natural)
    }
}

/// Returns the reserved prefix a name starts with, if any
pub fn reserved_prefix(name: &str) -> Option<&'static str> {
    RESERVED_PREFIXES
        .iter()
        .copied()
        .find(|prefix| name.starts_with(prefix))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers() {
        for name in ["x", "ngroup", "_private", "TDCcount", "a1_b2"] {
            assert_eq!(check_name(name).unwrap(), NameKind::Identifier, "{}", name);
        }
    }

    #[test]
    fn test_natural_names_accepted() {
        for name in ["my column", "2d", "temp-C", "åbc"] {
            assert_eq!(check_name(name).unwrap(), NameKind::Natural, "{}", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", ".", "a/b", "a\0b", "__x", "_v_align", "_c_x", "_f_y", "_g_z", "columns"] {
            let err = check_name(name).unwrap_err();
            assert_eq!(err.code(), "ROWLAYOUT_INVALID_NAME", "{:?}", name);
        }
    }

    #[test]
    fn test_reserved_prefix_lookup() {
        assert_eq!(reserved_prefix("_v_fmt"), Some("_v_"));
        assert_eq!(reserved_prefix("__init__"), Some("__"));
        assert_eq!(reserved_prefix("_x"), None);
    }
}
