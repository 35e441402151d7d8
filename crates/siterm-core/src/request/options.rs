//! Per-call options and request bodies.

use serde_json::{Map, Value};

use crate::encode::{encode_request, Params};
use crate::error::RequestError;

/// Body attached to a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Sent verbatim.
    Text(String),
    /// Parameters; form-encoded when the call's `encode` flag is set, otherwise
    /// serialized as a JSON object.
    Form {
        params: Params,
        list_fields: Vec<String>,
    },
}

impl Body {
    pub(crate) fn render(&self, encode: bool) -> Result<String, RequestError> {
        match self {
            Body::Text(text) => Ok(text.clone()),
            Body::Form {
                params,
                list_fields,
            } => {
                if encode {
                    encode_request(params, list_fields)
                } else {
                    serde_json::to_string(params)
                        .map_err(|e| RequestError::ValidityFailure(e.to_string()))
                }
            }
        }
    }
}

/// Options for one verb call.
///
/// `headers` is loosely typed and validated at call time; see
/// [`validate_headers`](super::validate_headers).
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub body: Option<Body>,
    pub headers: Value,
    pub encode: bool,
    pub decode: bool,
    /// Overrides the builder's content type for this call.
    pub content_type: Option<String>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            body: None,
            headers: Value::Null,
            encode: true,
            decode: true,
            content_type: None,
        }
    }
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    pub fn form<S: Into<String>>(mut self, params: Params, list_fields: impl IntoIterator<Item = S>) -> Self {
        self.body = Some(Body::Form {
            params,
            list_fields: list_fields.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Replaces the raw header argument.
    pub fn headers(mut self, headers: Value) -> Self {
        self.headers = headers;
        self
    }

    /// Adds one header. A header argument that is not a mapping is replaced by
    /// a fresh one.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if !self.headers.is_object() {
            self.headers = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.headers {
            map.insert(name.into(), Value::String(value.into()));
        }
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn decode(mut self, decode: bool) -> Self {
        self.decode = decode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_body() -> Body {
        let mut params = Params::new();
        params.insert("a".to_string(), "1".into());
        params.insert("b".to_string(), vec!["x", "y"].into());
        Body::Form {
            params,
            list_fields: vec!["b".to_string()],
        }
    }

    #[test]
    fn text_body_ignores_encode_flag() {
        let b = Body::Text("{\"k\": 1}".to_string());
        assert_eq!(b.render(true).unwrap(), "{\"k\": 1}");
        assert_eq!(b.render(false).unwrap(), "{\"k\": 1}");
    }

    #[test]
    fn form_body_is_form_encoded_when_encoding() {
        assert_eq!(form_body().render(true).unwrap(), "a=1&b=x&b=y");
    }

    #[test]
    fn form_body_is_json_when_not_encoding() {
        let rendered = form_body().render(false).unwrap();
        let v: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(v, json!({"a": "1", "b": ["x", "y"]}));
    }

    #[test]
    fn header_builder_starts_a_mapping() {
        let o = CallOptions::new().header("X-A", "1").header("X-B", "2");
        assert_eq!(o.headers, json!({"X-A": "1", "X-B": "2"}));
    }

    #[test]
    fn defaults_encode_and_decode() {
        let o = CallOptions::default();
        assert!(o.encode);
        assert!(o.decode);
        assert!(o.body.is_none());
        assert!(o.headers.is_null());
    }
}
