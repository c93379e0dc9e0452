//! Column default values

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{LayoutError, LayoutResult};
use crate::registry::{ScalarType, TypeKind};

/// A complex number default
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{:?}-{:?}i", self.re, -self.im)
        } else {
            write!(f, "{:?}+{:?}i", self.re, self.im)
        }
    }
}

/// Default value of a column.
///
/// Deserializes untagged: JSON booleans, integers, floats, strings and
/// `{"re": .., "im": ..}` objects map to the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Complex(Complex),
}

impl DefaultValue {
    /// Default used when a column declares none.
    ///
    /// Integer and boolean kinds get `0`, floats `0.0`, complex `0+0i`,
    /// text the empty string.
    pub fn zero_for(ty: ScalarType) -> Self {
        match ty.kind() {
            TypeKind::Bool | TypeKind::SignedInt | TypeKind::UnsignedInt => DefaultValue::Int(0),
            TypeKind::Float => DefaultValue::Float(0.0),
            TypeKind::Complex => DefaultValue::Complex(Complex::default()),
            TypeKind::Text => DefaultValue::Text(String::new()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DefaultValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Checks that this value can fill a column of `ty`.
    ///
    /// `length` is the resolved text run length for text columns.
    pub fn check_for(&self, ty: ScalarType, length: usize) -> LayoutResult<()> {
        let fits = match (ty.kind(), self) {
            (TypeKind::Bool, DefaultValue::Bool(_)) => true,
            (TypeKind::Bool, DefaultValue::Int(v)) => *v == 0 || *v == 1,
            (TypeKind::Bool, DefaultValue::UInt(v)) => *v == 0 || *v == 1,
            (TypeKind::SignedInt | TypeKind::UnsignedInt, DefaultValue::Bool(_)) => true,
            (TypeKind::SignedInt | TypeKind::UnsignedInt, DefaultValue::Int(v)) => {
                return check_integer_range(i128::from(*v), ty);
            }
            (TypeKind::SignedInt | TypeKind::UnsignedInt, DefaultValue::UInt(v)) => {
                return check_integer_range(i128::from(*v), ty);
            }
            (TypeKind::Float, DefaultValue::Int(_) | DefaultValue::UInt(_)) => true,
            (TypeKind::Float, DefaultValue::Float(_)) => true,
            (
                TypeKind::Complex,
                DefaultValue::Int(_)
                | DefaultValue::UInt(_)
                | DefaultValue::Float(_)
                | DefaultValue::Complex(_),
            ) => true,
            (TypeKind::Text, DefaultValue::Text(s)) => {
                if s.len() > length {
                    return Err(LayoutError::InvalidDefault(format!(
                        "default '{}' is longer than the text length {}",
                        s, length
                    )));
                }
                true
            }
            _ => false,
        };

        if fits {
            Ok(())
        } else {
            Err(LayoutError::InvalidDefault(format!(
                "{} does not fit a {} column",
                self.describe(),
                ty
            )))
        }
    }

    fn describe(&self) -> String {
        match self {
            DefaultValue::Text(s) => format!("text '{}'", s),
            other => format!("value {}", other),
        }
    }
}

/// Inclusive value range of an integer type
fn integer_range(ty: ScalarType) -> Option<(i128, i128)> {
    let range = match ty {
        ScalarType::Int8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
        ScalarType::UInt8 => (0, i128::from(u8::MAX)),
        ScalarType::Int16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
        ScalarType::UInt16 => (0, i128::from(u16::MAX)),
        ScalarType::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        ScalarType::UInt32 => (0, i128::from(u32::MAX)),
        ScalarType::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
        ScalarType::UInt64 => (0, i128::from(u64::MAX)),
        _ => return None,
    };
    Some(range)
}

fn check_integer_range(value: i128, ty: ScalarType) -> LayoutResult<()> {
    match integer_range(ty) {
        Some((min, max)) if value < min || value > max => Err(LayoutError::InvalidDefault(format!(
            "value {} is out of range for a {} column ({}..={})",
            value, ty, min, max
        ))),
        _ => Ok(()),
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(v) => write!(f, "{}", v),
            DefaultValue::Int(v) => write!(f, "{}", v),
            DefaultValue::UInt(v) => write!(f, "{}", v),
            DefaultValue::Float(v) => write!(f, "{:?}", v),
            DefaultValue::Text(s) => write!(f, "'{}'", s),
            DefaultValue::Complex(c) => write!(f, "{}", c),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        DefaultValue::Int(i64::from(v))
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Int(v)
    }
}

impl From<u64> for DefaultValue {
    fn from(v: u64) -> Self {
        DefaultValue::UInt(v)
    }
}

impl From<f32> for DefaultValue {
    fn from(v: f32) -> Self {
        DefaultValue::Float(f64::from(v))
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Float(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        DefaultValue::Text(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        DefaultValue::Text(v)
    }
}

impl From<Complex> for DefaultValue {
    fn from(v: Complex) -> Self {
        DefaultValue::Complex(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_each_kind() {
        assert_eq!(DefaultValue::zero_for(ScalarType::Int16), DefaultValue::Int(0));
        assert_eq!(DefaultValue::zero_for(ScalarType::UInt64), DefaultValue::Int(0));
        assert_eq!(DefaultValue::zero_for(ScalarType::Bool), DefaultValue::Int(0));
        assert_eq!(DefaultValue::zero_for(ScalarType::Float32), DefaultValue::Float(0.0));
        assert_eq!(
            DefaultValue::zero_for(ScalarType::Complex64),
            DefaultValue::Complex(Complex::new(0.0, 0.0))
        );
        assert_eq!(
            DefaultValue::zero_for(ScalarType::Text),
            DefaultValue::Text(String::new())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DefaultValue::Float(0.0).to_string(), "0.0");
        assert_eq!(DefaultValue::Complex(Complex::default()).to_string(), "0.0+0.0i");
        assert_eq!(DefaultValue::Complex(Complex::new(1.5, -2.0)).to_string(), "1.5-2.0i");
        assert_eq!(DefaultValue::from("abc").to_string(), "'abc'");
    }

    #[test]
    fn test_check_for_compatibility() {
        assert!(DefaultValue::Int(3).check_for(ScalarType::Float64, 8).is_ok());
        assert!(DefaultValue::Float(1.0).check_for(ScalarType::Complex32, 8).is_ok());
        assert!(DefaultValue::Bool(true).check_for(ScalarType::Bool, 1).is_ok());
        assert!(DefaultValue::Int(1).check_for(ScalarType::Bool, 1).is_ok());

        let err = DefaultValue::Float(1.5).check_for(ScalarType::Int32, 4).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_DEFAULT");
        assert!(DefaultValue::from("x").check_for(ScalarType::Int8, 1).is_err());
        assert!(DefaultValue::Int(0).check_for(ScalarType::Text, 4).is_err());
        assert!(DefaultValue::Int(2).check_for(ScalarType::Bool, 1).is_err());
    }

    #[test]
    fn test_integer_defaults_fit_width() {
        for v in [-128i64, 0, 127] {
            assert!(DefaultValue::Int(v).check_for(ScalarType::Int8, 1).is_ok(), "{}", v);
        }
        for v in [-129i64, 128, 1000] {
            let err = DefaultValue::Int(v).check_for(ScalarType::Int8, 1).unwrap_err();
            assert_eq!(err.code(), "ROWLAYOUT_INVALID_DEFAULT", "{}", v);
        }

        assert!(DefaultValue::Int(0).check_for(ScalarType::UInt8, 1).is_ok());
        assert!(DefaultValue::Int(255).check_for(ScalarType::UInt8, 1).is_ok());
        assert!(DefaultValue::Int(-1).check_for(ScalarType::UInt8, 1).is_err());
        assert!(DefaultValue::Int(256).check_for(ScalarType::UInt8, 1).is_err());

        assert!(DefaultValue::Int(i64::from(i16::MIN)).check_for(ScalarType::Int16, 2).is_ok());
        assert!(DefaultValue::Int(65_536).check_for(ScalarType::UInt16, 2).is_err());
        assert!(DefaultValue::Int(i64::from(u32::MAX)).check_for(ScalarType::UInt32, 4).is_ok());
        assert!(DefaultValue::Int(i64::from(i32::MAX) + 1).check_for(ScalarType::Int32, 4).is_err());
    }

    #[test]
    fn test_u64_defaults_above_i64_max() {
        let big = DefaultValue::UInt(u64::MAX);
        assert!(big.check_for(ScalarType::UInt64, 8).is_ok());
        assert!(big.check_for(ScalarType::Int64, 8).is_err());
        assert!(DefaultValue::Int(-1).check_for(ScalarType::UInt64, 8).is_err());
        assert!(DefaultValue::Int(i64::MIN).check_for(ScalarType::Int64, 8).is_ok());

        let v: DefaultValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v, big);
    }

    #[test]
    fn test_text_default_longer_than_length() {
        assert!(DefaultValue::from("hello").check_for(ScalarType::Text, 5).is_ok());
        let err = DefaultValue::from("hello").check_for(ScalarType::Text, 4).unwrap_err();
        assert_eq!(err.code(), "ROWLAYOUT_INVALID_DEFAULT");
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: DefaultValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, DefaultValue::Bool(true));
        let v: DefaultValue = serde_json::from_str("-4").unwrap();
        assert_eq!(v, DefaultValue::Int(-4));
        let v: DefaultValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, DefaultValue::Float(2.5));
        let v: DefaultValue = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(v, DefaultValue::Text("abc".into()));
        let v: DefaultValue = serde_json::from_str("{\"re\": 1.0, \"im\": 2.0}").unwrap();
        assert_eq!(v, DefaultValue::Complex(Complex::new(1.0, 2.0)));
    }
}
