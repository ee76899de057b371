//! Application configuration.
//!
//! Defaults, then an optional `listings.toml`, then `LISTINGS_*` environment
//! variables (`__` separates sections, e.g. `LISTINGS_TRANSPORT__KIND`).

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub transport: TransportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_workers: 8,
        }
    }
}

/// Which way the search page is retrieved. Exactly one is used per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    DirectProxy,
    ProbedProxy,
    UnblockingApi,
    HeadlessRender,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    pub kind: TransportKind,
    /// Origin of the listing site; search pages live under `/homes/`.
    pub base_url: String,
    pub fetch_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    /// IP-echo endpoint hit through the proxy before the real fetch. With
    /// `unblocking_api` the probe carries the unblocker's `Authorization`
    /// header, so point this at a service you trust with the key.
    pub probe_url: String,
    /// Skips TLS certificate checks. Off unless explicitly set.
    pub accept_invalid_certs: bool,
    pub proxy: ProxySettings,
    pub unblocker: UnblockerSettings,
    pub browser: BrowserSettings,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            kind: TransportKind::default(),
            base_url: "https://www.zillow.com".to_string(),
            fetch_timeout_secs: 15,
            probe_timeout_secs: 10,
            probe_url: "https://api.ipify.org?format=json".to_string(),
            accept_invalid_certs: false,
            proxy: ProxySettings::default(),
            unblocker: UnblockerSettings::default(),
            browser: BrowserSettings::default(),
        }
    }
}

/// Authenticated forward proxy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Third-party unblocking proxy authorised by API key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnblockerSettings {
    pub endpoint: Option<String>,
    /// Sent as `Authorization: Basic <api_key>` on the probe and the fetch.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Falls back to google-chrome / chromium on PATH.
    pub chrome_path: Option<PathBuf>,
    pub settle_secs: u64,
    pub headless: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            settle_secs: 5,
            headless: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("listings").required(false))
            .add_source(
                config::Environment::with_prefix("LISTINGS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the selected transport has what it needs to start.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.transport;

        if url::Url::parse(&t.base_url).is_err() {
            return Err(SettingsError::Invalid(format!(
                "transport.base_url is not a URL: {}",
                t.base_url
            )));
        }
        if t.fetch_timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "transport.fetch_timeout_secs must be positive".into(),
            ));
        }

        match t.kind {
            TransportKind::DirectProxy | TransportKind::ProbedProxy => {
                if t.proxy.url.is_none() {
                    return Err(SettingsError::Invalid(format!(
                        "{:?} needs transport.proxy.url",
                        t.kind
                    )));
                }
            }
            TransportKind::UnblockingApi => {
                if t.unblocker.endpoint.is_none() || t.unblocker.api_key.is_none() {
                    return Err(SettingsError::Invalid(
                        "unblocking_api needs transport.unblocker.endpoint and api_key".into(),
                    ));
                }
            }
            TransportKind::HeadlessRender => {}
        }

        Ok(())
    }
}
