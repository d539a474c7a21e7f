use std::fmt;
use std::fmt::Write as _;

use copse_containers::List;
use copse_tree::TreeMap;

/// Object facet: string keys in comparator (lexicographic) order.
pub type JsonObject = TreeMap<String, JsonValue>;

/// Array facet.
pub type JsonArray = List<JsonValue>;

/// A parsed JSON document node.
#[derive(Debug, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Object(JsonObject),
    Array(JsonArray),
}

impl JsonValue {
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Object member lookup; `None` for non-objects and missing keys.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?.get(&key.to_string())
    }

    /// Array element lookup; `None` for non-arrays and out of bounds.
    pub fn at(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Compact JSON rendering. Object members print in ascending key
/// order, which the ordered map guarantees for free.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(b) => write!(f, "{b}"),
            JsonValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            JsonValue::Str(s) => write_escaped(f, s),
            JsonValue::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            JsonValue::Object(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, key)?;
                    f.write_char(':')?;
                    write!(f, "{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_members_render_in_key_order() {
        let mut obj = JsonObject::new();
        obj.insert("zebra".to_string(), JsonValue::Number(1.0));
        obj.insert("apple".to_string(), JsonValue::Null);
        obj.insert("mango".to_string(), JsonValue::Bool(true));
        let value = JsonValue::Object(obj);
        assert_eq!(
            value.to_string(),
            r#"{"apple":null,"mango":true,"zebra":1}"#
        );
    }

    #[test]
    fn strings_escape_on_output() {
        let value = JsonValue::Str("a\"b\\c\nd\u{1}".to_string());
        assert_eq!(value.to_string(), "\"a\\\"b\\\\c\\nd\\u0001\"");
    }

    #[test]
    fn numbers_render_integers_without_fraction() {
        assert_eq!(JsonValue::Number(3.0).to_string(), "3");
        assert_eq!(JsonValue::Number(-0.5).to_string(), "-0.5");
        assert_eq!(JsonValue::Number(1.5e20).to_string(), "150000000000000000000");
    }

    #[test]
    fn accessors() {
        let mut obj = JsonObject::new();
        let mut arr = JsonArray::new();
        arr.append(JsonValue::Number(7.0));
        obj.insert("xs".to_string(), JsonValue::Array(arr));
        let value = JsonValue::Object(obj);
        assert_eq!(value.get("xs").and_then(|v| v.at(0)).and_then(JsonValue::as_f64), Some(7.0));
        assert!(value.get("missing").is_none());
        assert!(value.at(0).is_none());
    }
}
