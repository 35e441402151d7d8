//! Error kinds raised while building or executing a request.
//!
//! Validation failures are raised at the offending call and are never retried;
//! transport failures are passed through from the [`Transport`](crate::transport::Transport)
//! unchanged.

use thiserror::Error;

/// Error returned by request construction and verb calls.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Endpoint does not start with `http://` or `https://`, or cannot be split
    /// into host and port.
    #[error("{0}")]
    InvalidUrl(String),
    /// A caller-supplied argument has the wrong shape (e.g. headers that are not
    /// a mapping, or a list field holding a scalar).
    #[error("validity failure: {0}")]
    ValidityFailure(String),
    /// The transport failed to execute the request.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Error returned by a transport while executing a prepared request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (connect, timeout, bad option, ...).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Response body was requested decoded but is not valid JSON.
    #[error("decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_displays_message_verbatim() {
        let e = RequestError::InvalidUrl("bad host".to_string());
        assert_eq!(e.to_string(), "bad host");
    }

    #[test]
    fn transport_error_converts_into_request_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: RequestError = TransportError::Decode {
            url: "http://example.com/x".to_string(),
            source,
        }
        .into();
        assert!(matches!(e, RequestError::Transport(TransportError::Decode { .. })));
        assert!(e.to_string().starts_with("decode response from http://example.com/x"));
    }
}
