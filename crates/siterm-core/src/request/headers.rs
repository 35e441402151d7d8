//! Header maps and validation of caller-supplied headers.

use serde_json::Value;

use crate::error::RequestError;

const REDACTED: &str = "<redacted>";

/// Ordered header map with case-insensitive names.
///
/// Inserting a name that already exists (in any case) replaces the earlier
/// entry, so later layers win on collision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Overlays every entry of `other` onto `self`.
    pub fn extend(&mut self, other: &Headers) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy safe to log: the `Authorization` value is masked.
    pub fn redacted(&self) -> Headers {
        let entries = self
            .entries
            .iter()
            .map(|(n, v)| {
                if n.eq_ignore_ascii_case("authorization") {
                    (n.clone(), REDACTED.to_string())
                } else {
                    (n.clone(), v.clone())
                }
            })
            .collect();
        Headers { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

/// Turns a loosely-typed header argument into [`Headers`].
///
/// Empty-ish values (`null`, `false`, `0`, `""`, `[]`, `{}`) mean "no headers".
/// An object becomes a header map; string, number and bool members are
/// accepted. Anything else is a [`RequestError::ValidityFailure`].
pub fn validate_headers(arg: &Value) -> Result<Headers, RequestError> {
    if is_empty_value(arg) {
        return Ok(Headers::new());
    }
    let map = match arg {
        Value::Object(map) => map,
        other => {
            return Err(RequestError::ValidityFailure(format!(
                "Input {} != mapping.",
                type_name(other)
            )))
        }
    };

    let mut headers = Headers::new();
    for (name, value) in map {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(RequestError::ValidityFailure(format!(
                    "header {:?} has {} value, expected a string",
                    name,
                    type_name(other)
                )))
            }
        };
        headers.insert(name.clone(), value);
    }
    Ok(headers)
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
