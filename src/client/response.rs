//! Decoded API responses

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response payload: decoded JSON, or the raw text when decoding fails
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Decode a payload, falling back to lossy UTF-8 text
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResponseBody::Json(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    /// Field of a JSON object body
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_json().and_then(|v| v.get(field))
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of elements of an array/object body, or characters of a text body
    pub fn len(&self) -> usize {
        match self {
            ResponseBody::Json(Value::Array(items)) => items.len(),
            ResponseBody::Json(Value::Object(map)) => map.len(),
            ResponseBody::Json(Value::Null) => 0,
            ResponseBody::Json(_) => 1,
            ResponseBody::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable dump, one entry per line
    ///
    /// Arrays print each object element as `key: value` lines followed by a
    /// blank line; objects print their `key: value` lines; anything else is
    /// printed as-is.
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            ResponseBody::Json(Value::Array(items)) => {
                let mut lines = Vec::new();
                for item in items {
                    match item {
                        Value::Object(map) => {
                            lines.extend(map.iter().map(|(k, v)| format!("{}: {}", k, render_scalar(v))));
                            lines.push(String::new());
                        }
                        other => lines.push(render_scalar(other)),
                    }
                }
                lines
            }
            ResponseBody::Json(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, render_scalar(v)))
                .collect(),
            ResponseBody::Json(other) => vec![render_scalar(other)],
            ResponseBody::Text(text) => vec![text.clone()],
        }
    }
}

/// Strings without JSON quotes, everything else as compact JSON
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Status code plus decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Status in [200, 300)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize a JSON body into `T`
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        self.body
            .as_json()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    pub fn into_parts(self) -> (u16, ResponseBody) {
        (self.status, self.body)
    }
}
