//! Parameter and result value types
//!
//! [`Param`] is the closed set of values that can be bound to a statement.
//! [`NativeParam`] is what a driver actually receives once the parameter has
//! been mapped to its native type. [`DatabaseValue`] is what comes back in a
//! result row.

use super::error::{DatabaseError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A value that can be bound to a named placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Bound as its string representation
    Float(f64),
    Null,
}

/// Native parameter type selected for a bound value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    Int,
    Str,
    Null,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamType::Bool => "BOOL",
            ParamType::Int => "INT",
            ParamType::Str => "STRING",
            ParamType::Null => "NULL",
        })
    }
}

/// A parameter after type mapping, as handed to a driver's bind call
#[derive(Debug, Clone, PartialEq)]
pub enum NativeParam<'a> {
    Bool(bool),
    Int(i64),
    Str(Cow<'a, str>),
    Null,
}

impl NativeParam<'_> {
    pub fn param_type(&self) -> ParamType {
        match self {
            NativeParam::Bool(_) => ParamType::Bool,
            NativeParam::Int(_) => ParamType::Int,
            NativeParam::Str(_) => ParamType::Str,
            NativeParam::Null => ParamType::Null,
        }
    }
}

impl fmt::Display for NativeParam<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeParam::Bool(v) => write!(f, "{v}"),
            NativeParam::Int(v) => write!(f, "{v}"),
            NativeParam::Str(v) => f.write_str(v),
            NativeParam::Null => f.write_str("null"),
        }
    }
}

impl Param {
    /// Map this value onto its native parameter representation.
    ///
    /// Floating-point values are never bound numerically; they travel as the
    /// text produced by `f64`'s `Display`.
    pub fn to_native(&self) -> NativeParam<'_> {
        match self {
            Param::Bool(v) => NativeParam::Bool(*v),
            Param::Int(v) => NativeParam::Int(*v),
            Param::Str(v) => NativeParam::Str(Cow::Borrowed(v)),
            Param::Float(v) => NativeParam::Str(Cow::Owned(v.to_string())),
            Param::Null => NativeParam::Null,
        }
    }

    /// Native type this value binds as
    pub fn param_type(&self) -> ParamType {
        match self {
            Param::Bool(_) => ParamType::Bool,
            Param::Int(_) => ParamType::Int,
            Param::Str(_) | Param::Float(_) => ParamType::Str,
            Param::Null => ParamType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }

    /// Get the kind name of this value
    pub fn kind(&self) -> &'static str {
        match self {
            Param::Bool(_) => "boolean",
            Param::Int(_) => "integer",
            Param::Str(_) => "string",
            Param::Float(_) => "double",
            Param::Null => "null",
        }
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Param {
                fn from(v: $ty) -> Self {
                    Param::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Param::Float(f64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Str(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Str(v.to_string())
    }
}

impl From<&String> for Param {
    fn from(v: &String) -> Self {
        Param::Str(v.clone())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Param::Null,
        }
    }
}

/// Dynamic values are the one place an unsupported kind can still show up.
impl TryFrom<serde_json::Value> for Param {
    type Error = DatabaseError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Param::Null),
            Value::Bool(v) => Ok(Param::Bool(v)),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Param::Int(v))
                } else if let Some(v) = n.as_f64() {
                    Ok(Param::Float(v))
                } else {
                    Err(DatabaseError::unsupported_type("number"))
                }
            }
            Value::String(v) => Ok(Param::Str(v)),
            Value::Array(_) => Err(DatabaseError::unsupported_type("array")),
            Value::Object(_) => Err(DatabaseError::unsupported_type("object")),
        }
    }
}

/// Value read back from a result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatabaseValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl DatabaseValue {
    /// Get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DatabaseValue::Integer(v) => Some(*v != 0),
            DatabaseValue::Text(s) => match s.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the value as an i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DatabaseValue::Integer(v) => Some(*v),
            DatabaseValue::Real(v) => Some(*v as i64),
            DatabaseValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as an f64
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DatabaseValue::Real(v) => Some(*v),
            DatabaseValue::Integer(v) => Some(*v as f64),
            DatabaseValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Borrow the text of a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DatabaseValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the value as a string (with conversion)
    pub fn as_string(&self) -> String {
        match self {
            DatabaseValue::Null => "null".to_string(),
            DatabaseValue::Integer(v) => v.to_string(),
            DatabaseValue::Real(v) => v.to_string(),
            DatabaseValue::Text(s) => s.clone(),
            DatabaseValue::Blob(b) => format!("<{} bytes>", b.len()),
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DatabaseValue::Blob(b) => Some(b),
            DatabaseValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            DatabaseValue::Null => "null",
            DatabaseValue::Integer(_) => "integer",
            DatabaseValue::Real(_) => "real",
            DatabaseValue::Text(_) => "text",
            DatabaseValue::Blob(_) => "blob",
        }
    }
}

impl From<&str> for DatabaseValue {
    fn from(v: &str) -> Self {
        DatabaseValue::Text(v.to_string())
    }
}

impl From<i64> for DatabaseValue {
    fn from(v: i64) -> Self {
        DatabaseValue::Integer(v)
    }
}

/// A row of results (column name -> value mapping)
pub type DatabaseRow = HashMap<String, DatabaseValue>;

/// Rows returned from a query, in the order the engine produced them
pub type DatabaseResult = Vec<DatabaseRow>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closed_type_mapping() {
        assert_eq!(Param::from(true).param_type(), ParamType::Bool);
        assert_eq!(Param::from(7u8).param_type(), ParamType::Int);
        assert_eq!(Param::from(-7i64).param_type(), ParamType::Int);
        assert_eq!(Param::from("a").param_type(), ParamType::Str);
        assert_eq!(Param::from(1.5).param_type(), ParamType::Str);
        assert_eq!(Param::from(Option::<i32>::None).param_type(), ParamType::Null);
    }

    #[test]
    fn test_float_binds_as_text() {
        assert_eq!(
            Param::Float(1.25).to_native(),
            NativeParam::Str(Cow::Owned("1.25".to_string()))
        );
        assert_eq!(Param::Float(3.0).to_native(), NativeParam::Str("3".into()));
        assert_eq!(Param::Float(1.25).to_native().param_type(), ParamType::Str);
    }

    #[test]
    fn test_native_type_matches_param_type() {
        let params = [
            Param::Bool(false),
            Param::Int(0),
            Param::Str(String::new()),
            Param::Float(0.5),
            Param::Null,
        ];
        for param in &params {
            assert_eq!(param.to_native().param_type(), param.param_type());
        }
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Param::try_from(json!(null)).unwrap(), Param::Null);
        assert_eq!(Param::try_from(json!(true)).unwrap(), Param::Bool(true));
        assert_eq!(Param::try_from(json!(12)).unwrap(), Param::Int(12));
        assert_eq!(Param::try_from(json!(0.5)).unwrap(), Param::Float(0.5));
        assert_eq!(Param::try_from(json!("x")).unwrap(), Param::Str("x".into()));

        let err = Param::try_from(json!([1, 2])).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedType { ref kind } if kind == "array"));
        let err = Param::try_from(json!({"a": 1})).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedType { ref kind } if kind == "object"));
    }

    #[test]
    fn test_database_value_accessors() {
        let val = DatabaseValue::Integer(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_double(), Some(42.0));
        assert_eq!(val.as_bool(), Some(true));
        assert_eq!(val.as_string(), "42");

        let val = DatabaseValue::Text("123".to_string());
        assert_eq!(val.as_int(), Some(123));
        assert_eq!(val.as_str(), Some("123"));

        assert!(DatabaseValue::Null.is_null());
        assert_eq!(DatabaseValue::Blob(vec![1, 2]).as_string(), "<2 bytes>");
        assert_eq!(DatabaseValue::Real(0.5).type_name(), "real");
    }

    #[test]
    fn test_row_serializes() {
        let mut row = DatabaseRow::new();
        row.insert("name".to_string(), DatabaseValue::from("a"));
        let encoded = serde_json::to_value(&row).unwrap();
        assert_eq!(encoded, json!({"name": {"Text": "a"}}));
    }
}
