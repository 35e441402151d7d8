//! Request construction and verb dispatch.
//!
//! A [`RequestBuilder`] is bound to one base host (and credential set) and
//! reused for many calls. Each call layers its headers over the builder's
//! defaults and stored basic-auth header, appends the `uri` to the host and
//! hands the result to the [`Transport`].

mod config;
mod headers;
mod options;

pub use config::{ConfigOverrides, RequestConfig, DEFAULT_ACCEPT_TYPE, DEFAULT_CONTENT_TYPE};
pub use headers::{validate_headers, Headers};
pub use options::{Body, CallOptions};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::RequestError;
use crate::transport::{CurlTransport, PreparedRequest, ResponseBody, Transport, Verb};
use crate::url_model::{check_server_url, sanitize_url, split_url, UrlParts};

/// Client identifier sent as `User-agent` on every request.
pub const USER_AGENT: &str = "DTN-RM";

/// Result of a verb call: body, status code, reason phrase and cache flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub body: ResponseBody,
    pub status: u32,
    pub reason: String,
    pub from_cache: bool,
}

/// Builds and dispatches requests against one base host.
#[derive(Debug)]
pub struct RequestBuilder<T = CurlTransport> {
    config: RequestConfig,
    additional_headers: Headers,
    endpoint: UrlParts,
    transport: T,
}

impl RequestBuilder<CurlTransport> {
    /// Builder using the default libcurl transport.
    pub fn new(url: &str, overrides: ConfigOverrides) -> Result<Self, RequestError> {
        Self::with_transport(url, overrides, CurlTransport::default())
    }
}

impl<T: Transport> RequestBuilder<T> {
    /// Creates a builder for `url`.
    ///
    /// Credentials embedded in `url` are moved into a basic-auth header and the
    /// working host becomes the credential-free URL. `overrides` are merged
    /// over the defaults, then the host must start with `http(s)://`.
    pub fn with_transport(
        url: &str,
        overrides: ConfigOverrides,
        transport: T,
    ) -> Result<Self, RequestError> {
        let mut additional_headers = Headers::new();
        let mut host = url.to_string();

        let endpoint = sanitize_url(url)?;
        if let Some(username) = endpoint.username.as_deref() {
            additional_headers.insert(
                "Authorization",
                basic_auth_value(username, endpoint.password.as_deref()),
            );
            host = endpoint.url;
        }

        let mut config = RequestConfig::with_host(host);
        config.merge(overrides);
        check_server_url(&config.host)?;
        let endpoint = split_url(&config.host)?;

        tracing::debug!(
            host = %config.host,
            basic_auth = additional_headers.get("Authorization").is_some(),
            "request builder ready"
        );

        Ok(Self {
            config,
            additional_headers,
            endpoint,
            transport,
        })
    }

    /// Stores (or replaces) the basic-auth header sent with every call.
    pub fn add_basic_auth(&mut self, username: &str, password: Option<&str>) {
        self.additional_headers
            .insert("Authorization", basic_auth_value(username, password));
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Headers stored on the builder (basic-auth), layered over the defaults.
    pub fn additional_headers(&self) -> &Headers {
        &self.additional_headers
    }

    /// Parsed components of the working host.
    pub fn endpoint_components(&self) -> &UrlParts {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, uri: &str, options: CallOptions) -> Result<Reply, RequestError> {
        self.make_request(Verb::Get, uri, options)
    }

    pub fn post(&self, uri: &str, options: CallOptions) -> Result<Reply, RequestError> {
        self.make_request(Verb::Post, uri, options)
    }

    pub fn put(&self, uri: &str, options: CallOptions) -> Result<Reply, RequestError> {
        self.make_request(Verb::Put, uri, options)
    }

    pub fn delete(&self, uri: &str, options: CallOptions) -> Result<Reply, RequestError> {
        self.make_request(Verb::Delete, uri, options)
    }

    /// Prepares the request and executes it through the transport.
    pub fn make_request(
        &self,
        verb: Verb,
        uri: &str,
        options: CallOptions,
    ) -> Result<Reply, RequestError> {
        let prepared = self.prepare(verb, uri, &options)?;
        let (head, body) = self.transport.execute(&prepared, options.decode)?;
        Ok(Reply {
            body,
            status: head.status,
            reason: head.reason,
            from_cache: head.from_cache,
        })
    }

    /// Assembles method, URL, headers and body without doing any I/O.
    ///
    /// `uri` is appended to the host as-is; callers supply the leading `/`.
    pub fn prepare(
        &self,
        verb: Verb,
        uri: &str,
        options: &CallOptions,
    ) -> Result<PreparedRequest, RequestError> {
        let incoming = validate_headers(&options.headers)?;

        let content_type = options
            .content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(&self.config.content_type);

        let mut headers = Headers::new();
        headers.insert("Content-type", content_type);
        headers.insert("User-agent", USER_AGENT);
        headers.insert("Accept", self.config.accept_type.as_str());
        headers.extend(&self.additional_headers);
        headers.extend(&incoming);

        let body = options
            .body
            .as_ref()
            .map(|b| b.render(options.encode))
            .transpose()?;

        let url = format!("{}{}", self.config.host, uri);
        tracing::debug!(verb = %verb, url = %url, headers = ?headers.redacted(), "prepared request");

        Ok(PreparedRequest {
            verb,
            url,
            headers,
            body,
        })
    }
}

/// `Basic base64(username:password)`; a missing password encodes as empty.
fn basic_auth_value(username: &str, password: Option<&str>) -> String {
    let credentials = format!("{}:{}", username, password.unwrap_or(""));
    format!("Basic {}", STANDARD.encode(credentials))
}
