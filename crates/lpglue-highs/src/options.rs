//! Typed HiGHS option values.

use crate::ffi::HighsInt;
use std::fmt;

/// Declared type of a HiGHS option (`kHighsOptionType*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Int,
    Double,
    String,
}

impl OptionType {
    pub(crate) fn from_code(code: HighsInt) -> Option<Self> {
        match code {
            0 => Some(OptionType::Bool),
            1 => Some(OptionType::Int),
            2 => Some(OptionType::Double),
            3 => Some(OptionType::String),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Bool => "bool",
            OptionType::Int => "int",
            OptionType::Double => "double",
            OptionType::String => "string",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    Str(String),
}

impl OptionValue {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::Bool(_) => OptionType::Bool,
            OptionValue::Int(_) => OptionType::Int,
            OptionValue::Double(_) => OptionType::Double,
            OptionValue::Str(_) => OptionType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            OptionValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Double(value) => write!(f, "{value}"),
            OptionValue::Str(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Double(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_types() {
        assert_eq!(OptionValue::from(true).option_type(), OptionType::Bool);
        assert_eq!(OptionValue::from(4).option_type(), OptionType::Int);
        assert_eq!(OptionValue::from(1.5).option_type(), OptionType::Double);
        assert_eq!(OptionValue::from("ipm").option_type(), OptionType::String);
    }

    #[test]
    fn test_option_value_accessors() {
        assert_eq!(OptionValue::Bool(true).as_bool(), Some(true));
        assert_eq!(OptionValue::Bool(true).as_int(), None);
        assert_eq!(OptionValue::Int(3).as_int(), Some(3));
        assert_eq!(OptionValue::Double(0.5).as_double(), Some(0.5));
        assert_eq!(OptionValue::from("off").as_str(), Some("off"));
        assert_eq!(OptionValue::from("off").to_string(), "off");
    }

    #[test]
    fn test_option_type_codes() {
        assert_eq!(OptionType::from_code(0), Some(OptionType::Bool));
        assert_eq!(OptionType::from_code(3), Some(OptionType::String));
        assert_eq!(OptionType::from_code(4), None);
    }
}
