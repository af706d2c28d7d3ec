// File: src/value.rs
// Purpose: Dynamic field values carried by records, defaults and rule tables

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A submitted record: field name (alias or canonical) to raw value
pub type Record = HashMap<String, Value>;

/// Nested mapping used by rule tables and object values
pub type Map = HashMap<String, Value>;

/// Supported value types in records and rule configuration
///
/// Integers are kept exact; only numbers with a fraction or exponent are
/// stored as `Float`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Truthiness used by default substitution and merge overrides.
    ///
    /// Null, `false`, zero, and empty strings, arrays or objects are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::UInt(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(arr) => !arr.is_empty(),
            Value::Object(obj) => !obj.is_empty(),
            Value::Null => false,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Text a pattern is matched against.
    ///
    /// Top-level strings are used as-is. Null renders as `None` and booleans
    /// as `True`/`False`; integral floats keep their `.0`. Strings nested in
    /// arrays or objects are single-quoted and object keys are sorted.
    pub fn to_match_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.repr(),
        }
    }

    fn repr(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(n) => float_repr(*n),
            Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(Value::repr).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Object(obj) => {
                let mut keys: Vec<&String> = obj.keys().collect();
                keys.sort();
                let items: Vec<String> = keys
                    .into_iter()
                    .map(|k| format!("{}: {}", Value::from(k.as_str()).repr(), obj[k].repr()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
        }
    }
}

fn float_repr(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "inf" } else { "-inf" }).to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

/// Plain rendering for messages and logs
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Object(_) => f.write_str("[Object]"),
            Value::Null => f.write_str("null"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => arr.serialize(serializer),
            Value::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::UInt(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Map> for Value {
    fn from(obj: Map) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Number> for Value {
    fn from(n: serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Value::Int(i)
        } else if let Some(u) = n.as_u64() {
            Value::UInt(u)
        } else {
            n.as_f64().map(Value::Float).unwrap_or(Value::Null)
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::from(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(0u64).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::Object(Map::new()).is_truthy());

        assert!(Value::from(true).is_truthy());
        assert!(Value::from(-1).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Array(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn test_match_string_rendering() {
        assert_eq!(Value::Null.to_match_string(), "None");
        assert_eq!(Value::from(true).to_match_string(), "True");
        assert_eq!(Value::from(false).to_match_string(), "False");
        assert_eq!(Value::from(42).to_match_string(), "42");
        assert_eq!(Value::from(1.5).to_match_string(), "1.5");
        assert_eq!(Value::from(2.0).to_match_string(), "2.0");
        assert_eq!(Value::from("abc").to_match_string(), "abc");
        assert_eq!(
            Value::Array(vec![Value::from(1), Value::from("b"), Value::Null]).to_match_string(),
            "[1, 'b', None]"
        );
    }

    #[test]
    fn test_match_string_object_keys_sorted() {
        let value = Value::from(serde_json::json!({"b": 2, "a": "x"}));
        assert_eq!(value.to_match_string(), "{'a': 'x', 'b': 2}");
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"age": 42, "tags": ["a"], "none": null, "ratio": 0.5});
        let value = Value::from(json);
        let obj = value.as_object().unwrap();
        assert_eq!(obj["age"], Value::Int(42));
        assert_eq!(obj["tags"], Value::Array(vec![Value::from("a")]));
        assert_eq!(obj["none"], Value::Null);
        assert_eq!(obj["ratio"], Value::Float(0.5));
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 9007199254740993, "b": 12345678901234567890}"#).unwrap();
        let value = Value::from(json);
        let obj = value.as_object().unwrap();

        assert_eq!(obj["a"], Value::Int(9007199254740993));
        assert_eq!(obj["a"].to_match_string(), "9007199254740993");
        assert_eq!(obj["b"], Value::UInt(12345678901234567890));
        assert_eq!(
            serde_json::to_string(&obj["b"]).unwrap(),
            "12345678901234567890"
        );
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value =
            serde_json::from_str(r#"{"a": [1, "x", true, null, 2.5, 9007199254740993]}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(
            obj["a"],
            Value::Array(vec![
                Value::Int(1),
                Value::from("x"),
                Value::Bool(true),
                Value::Null,
                Value::Float(2.5),
                Value::Int(9007199254740993),
            ])
        );
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serde_json::to_string(&Value::from(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&Value::from(2.5)).unwrap(), "2.5");
    }
}
