//! Per-builder request configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

pub const DEFAULT_ACCEPT_TYPE: &str = "application/json";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Configuration owned by one [`RequestBuilder`](super::RequestBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Base URL every `uri` is appended to.
    pub host: String,
    pub accept_type: String,
    pub content_type: String,
    /// Arbitrary caller-supplied entries carried along with the builder.
    pub extra: BTreeMap<String, String>,
}

impl RequestConfig {
    pub(crate) fn with_host(host: String) -> Self {
        Self {
            host,
            accept_type: DEFAULT_ACCEPT_TYPE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Applies caller overrides; set fields win over the current values.
    pub(crate) fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(accept_type) = overrides.accept_type {
            self.accept_type = accept_type;
        }
        if let Some(content_type) = overrides.content_type {
            self.content_type = content_type;
        }
        self.extra.extend(overrides.extra);
    }
}

/// Caller-supplied values merged over the builder defaults at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub accept_type: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ConfigOverrides {
    pub fn accept_type(mut self, accept_type: impl Into<String>) -> Self {
        self.accept_type = Some(accept_type.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
