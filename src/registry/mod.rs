//! Type Registry for rowlayout
//!
//! Maps type names to [`ScalarType`] values, and layout / bulk codes back to
//! types for rebuilding a schema from an existing descriptor.
//!
//! # Design Principles
//!
//! - Process-wide and read-only after first use
//! - Consulted before any column is constructed
//! - Closed set of types: no runtime registration

mod alignment;
mod types;

pub use alignment::Alignment;
pub use types::{ScalarType, TypeKind};

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::errors::{LayoutError, LayoutResult};

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Lookup tables from names and codes to scalar types.
pub struct TypeRegistry {
    /// Canonical names, short aliases and bulk codes
    names: HashMap<&'static str, ScalarType>,
    /// Descriptor layout codes
    layout_codes: HashMap<char, ScalarType>,
}

impl TypeRegistry {
    fn build() -> Self {
        let mut names = HashMap::new();
        let mut layout_codes = HashMap::new();

        for ty in ScalarType::ALL {
            names.insert(ty.name(), ty);
            names.insert(ty.bulk_code(), ty);
            layout_codes.insert(ty.layout_code(), ty);
        }

        names.insert("CharType", ScalarType::Text);
        names.insert("Int", ScalarType::Int32);
        names.insert("UInt", ScalarType::UInt32);
        names.insert("Float", ScalarType::Float64);
        names.insert("Complex", ScalarType::Complex64);

        Self {
            names,
            layout_codes,
        }
    }

    /// Returns the process-wide registry, building it on first use.
    pub fn global() -> &'static TypeRegistry {
        REGISTRY.get_or_init(TypeRegistry::build)
    }

    /// Resolves a type name, alias or bulk code.
    pub fn resolve(&self, name: &str) -> LayoutResult<ScalarType> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::UnsupportedType(format!("unknown type name '{}'", name)))
    }

    /// Inverse of [`ScalarType::layout_code`]
    pub fn from_layout_code(&self, code: char) -> Option<ScalarType> {
        self.layout_codes.get(&code).copied()
    }
}

/// Resolves a type name against the global registry
pub fn resolve(name: &str) -> LayoutResult<ScalarType> {
    TypeRegistry::global().resolve(name)
}

/// Looks a layout code up in the global registry
pub fn from_layout_code(code: char) -> Option<ScalarType> {
    TypeRegistry::global().from_layout_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_names() {
        for ty in ScalarType::ALL {
            assert_eq!(resolve(ty.name()).unwrap(), ty);
        }
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve("Int").unwrap(), ScalarType::Int32);
        assert_eq!(resolve("Float").unwrap(), ScalarType::Float64);
        assert_eq!(resolve("Complex").unwrap(), ScalarType::Complex64);
        assert_eq!(resolve("CharType").unwrap(), ScalarType::Text);
        assert_eq!(resolve("u2").unwrap(), ScalarType::UInt16);
        assert_eq!(resolve("c8").unwrap(), ScalarType::Complex32);
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        let err = resolve("Int24").unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_UNSUPPORTED_TYPE");
        assert!(err.to_string().contains("Int24"));
        // Names are case-sensitive
        assert!(resolve("int32").is_err());
    }

    #[test]
    fn test_layout_code_inverse() {
        for ty in ScalarType::ALL {
            assert_eq!(from_layout_code(ty.layout_code()), Some(ty));
        }
        assert_eq!(from_layout_code('z'), None);
    }

    #[test]
    fn test_global_is_shared() {
        let a = TypeRegistry::global() as *const TypeRegistry;
        let b = TypeRegistry::global() as *const TypeRegistry;
        assert_eq!(a, b);
    }
}
