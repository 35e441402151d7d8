//! libcurl-backed transport.
//!
//! GET sends its body as the query string; POST, PUT and DELETE send it as the
//! request payload. Client certificates are not configured.

use std::str;
use std::time::Duration;

use curl::easy::{Easy, List};

use super::status::final_reason;
use super::{decode_body, PreparedRequest, ResponseBody, ResponseHead, Transport, Verb};
use crate::config::TransportConfig;
use crate::error::TransportError;

/// Executes requests with a fresh libcurl easy handle per call.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    config: TransportConfig,
}

impl CurlTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

/// URL actually requested: GET carries a non-empty body as `?query`.
fn effective_url(request: &PreparedRequest) -> String {
    match (request.verb, request.body.as_deref()) {
        (Verb::Get, Some(query)) if !query.is_empty() => format!("{}?{}", request.url, query),
        _ => request.url.clone(),
    }
}

impl Transport for CurlTransport {
    fn execute(
        &self,
        request: &PreparedRequest,
        decode: bool,
    ) -> Result<(ResponseHead, ResponseBody), TransportError> {
        let url = effective_url(request);
        let mut header_lines: Vec<String> = Vec::new();
        let mut raw_body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(&url)?;
        easy.follow_location(self.config.follow_redirects)?;
        easy.connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(self.config.timeout_secs))?;

        match request.verb {
            Verb::Get => easy.get(true)?,
            Verb::Post => {
                easy.post(true)?;
                easy.post_fields_copy(request.body.as_deref().unwrap_or("").as_bytes())?;
            }
            Verb::Put | Verb::Delete => {
                easy.custom_request(request.verb.as_str())?;
                if let Some(body) = request.body.as_deref() {
                    easy.post_fields_copy(body.as_bytes())?;
                }
            }
        }

        let mut list = List::new();
        for (name, value) in request.headers.iter() {
            list.append(&format!("{}: {}", name.trim(), value.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                raw_body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let reason = final_reason(&header_lines);
        tracing::debug!(verb = %request.verb, url = %url, status, reason = %reason, "response received");

        let body = decode_body(&url, &raw_body, decode).map_err(|e| {
            tracing::warn!("{}", e);
            e
        })?;

        Ok((
            ResponseHead {
                status,
                reason,
                from_cache: false,
            },
            body,
        ))
    }
}
