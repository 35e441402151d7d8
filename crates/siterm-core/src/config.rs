use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::request::{ConfigOverrides, DEFAULT_ACCEPT_TYPE, DEFAULT_CONTENT_TYPE};

/// libcurl transport settings (optional `[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request, including the body.
    pub timeout_secs: u64,
    /// Follow 3xx redirects.
    pub follow_redirects: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 300,
            follow_redirects: true,
        }
    }
}

/// Default request content negotiation (optional `[client]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDefaults {
    pub accept_type: String,
    pub content_type: String,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            accept_type: DEFAULT_ACCEPT_TYPE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl ClientDefaults {
    /// Overrides to hand to a request builder.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides::default()
            .accept_type(self.accept_type.clone())
            .content_type(self.content_type.clone())
    }
}

/// Global configuration loaded from `~/.config/siterm/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitermConfig {
    #[serde(default)]
    pub client: ClientDefaults,
    #[serde(default)]
    pub transport: TransportConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("siterm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitermConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SitermConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path; the file must exist.
pub fn load_from(path: &Path) -> Result<SitermConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SitermConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
