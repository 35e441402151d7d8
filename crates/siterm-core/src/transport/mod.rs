//! Request execution.
//!
//! [`RequestBuilder`](crate::request::RequestBuilder) only talks to the
//! [`Transport`] trait; [`CurlTransport`] is the libcurl-backed implementation
//! used by default.

mod libcurl;
mod status;

pub use libcurl::CurlTransport;
pub use status::parse_status_line;

use std::fmt;

use serde_json::Value;

use crate::error::TransportError;
use crate::request::Headers;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully assembled request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// Status information of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    pub reason: String,
    /// True if the response was served from a cache rather than the origin.
    pub from_cache: bool,
}

/// Response body, decoded from JSON or left as text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

impl ResponseBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            ResponseBody::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            ResponseBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Text(s) => f.write_str(s),
            ResponseBody::Json(v) if f.alternate() => write!(f, "{:#}", v),
            ResponseBody::Json(v) => write!(f, "{}", v),
        }
    }
}

/// Executes prepared requests.
///
/// Implementations decide how the network I/O happens; non-2xx statuses are
/// returned in [`ResponseHead`], not as errors.
pub trait Transport {
    fn execute(
        &self,
        request: &PreparedRequest,
        decode: bool,
    ) -> Result<(ResponseHead, ResponseBody), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(
        &self,
        request: &PreparedRequest,
        decode: bool,
    ) -> Result<(ResponseHead, ResponseBody), TransportError> {
        (**self).execute(request, decode)
    }
}

/// Decodes a raw response body according to the `decode` flag.
///
/// An empty body decodes to JSON `null`.
pub(crate) fn decode_body(url: &str, raw: &[u8], decode: bool) -> Result<ResponseBody, TransportError> {
    if !decode {
        return Ok(ResponseBody::Text(String::from_utf8_lossy(raw).into_owned()));
    }
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::Json(Value::Null));
    }
    serde_json::from_slice(raw)
        .map(ResponseBody::Json)
        .map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_names() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Post.as_str(), "POST");
        assert_eq!(Verb::Put.as_str(), "PUT");
        assert_eq!(Verb::Delete.as_str(), "DELETE");
    }

    #[test]
    fn decode_json_body() {
        let b = decode_body("http://h/", br#"{"ok": true}"#, true).unwrap();
        assert_eq!(b.as_json(), Some(&json!({"ok": true})));
    }

    #[test]
    fn decode_empty_body_is_null() {
        let b = decode_body("http://h/", b"  \n", true).unwrap();
        assert_eq!(b, ResponseBody::Json(Value::Null));
    }

    #[test]
    fn decode_invalid_json_errors() {
        let e = decode_body("http://h/x", b"<html>", true).unwrap_err();
        assert!(matches!(e, TransportError::Decode { ref url, .. } if url == "http://h/x"));
    }

    #[test]
    fn raw_body_kept_as_text() {
        let b = decode_body("http://h/", b"<html>", false).unwrap();
        assert_eq!(b.as_text(), Some("<html>"));
    }

    #[test]
    fn display_pretty_prints_json_in_alternate_mode() {
        let b = ResponseBody::Json(json!({"a": 1}));
        assert_eq!(format!("{}", b), r#"{"a":1}"#);
        assert_eq!(format!("{:#}", b), "{\n  \"a\": 1\n}");
    }
}
