//! Form encoding of request parameters.
//!
//! Scalars are form-urlencoded; fields the server expects as lists are sent
//! as repeated `key=value` pairs appended after the scalar part, each value
//! quoted on its own.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Characters left unquoted in list values: alphanumerics and `-._/`.
/// `~` is quoted as `%7E`.
const LIST_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/');

/// A single parameter value. Deserializes from a JSON string or an array of
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::List(v.into_iter().map(str::to_string).collect())
    }
}

/// Request parameters, kept in key order so encoding is deterministic.
pub type Params = BTreeMap<String, ParamValue>;

/// Encodes `params` into a form body or query string.
///
/// Every key named in `list_fields` that is present is emitted as
/// `&key=v1&key=v2...` after the scalar part, in `list_fields` order. Empty
/// lists emit nothing. `params` itself is left untouched, so encoding the same
/// input twice gives the same string.
///
/// # Examples
///
/// - `{"a": "1", "b": ["x", "y"]}` with `["b"]` → `"a=1&b=x&b=y"`
pub fn encode_request<S: AsRef<str>>(
    params: &Params,
    list_fields: &[S],
) -> Result<String, RequestError> {
    let mut remaining = params.clone();
    let mut encoded_lists = String::new();

    for field in list_fields {
        let field = field.as_ref();
        match remaining.remove(field) {
            None => {}
            Some(ParamValue::List(values)) => {
                for value in &values {
                    encoded_lists.push('&');
                    encoded_lists.push_str(field);
                    encoded_lists.push('=');
                    encoded_lists.extend(utf8_percent_encode(value, LIST_VALUE_ENCODE_SET));
                }
            }
            Some(ParamValue::Scalar(_)) => {
                return Err(RequestError::ValidityFailure(format!(
                    "list field {:?} holds a scalar value",
                    field
                )));
            }
        }
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &remaining {
        match value {
            ParamValue::Scalar(v) => {
                serializer.append_pair(key, v);
            }
            ParamValue::List(values) => {
                for v in values {
                    serializer.append_pair(key, v);
                }
            }
        }
    }

    let mut encoded = serializer.finish();
    encoded.push_str(&encoded_lists);
    Ok(encoded)
}
