use serde::{Deserialize, Serialize};

/// A single SQL value as encoded on the wire.
///
/// Integers travel as decimal strings so that 64-bit values survive JSON number handling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Value {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text {
            value: value.into(),
        }
    }

    pub fn integer(value: i64) -> Self {
        Value::Integer {
            value: value.to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text { value }
    }
}
