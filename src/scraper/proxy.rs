// proxy.rs
use crate::scraper::transport::{parse_base, search_url, Transport};
use crate::scraper::TransportError;
use crate::settings::TransportSettings;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::{Proxy, StatusCode};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Connectivity check run through the proxy before the real fetch.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
    pub url: String,
    pub timeout: Duration,
}

/// Blocking client bound to one proxy, shared by the proxy-based transports.
///
/// `headers` are attached to each probe and fetch this client sends. They are
/// not client defaults, so nothing else built on the client picks them up.
pub(crate) struct ProxiedClient {
    client: Client,
    headers: HeaderMap,
    fetch_timeout: Duration,
}

impl ProxiedClient {
    pub fn new(
        proxy: Proxy,
        headers: HeaderMap,
        settings: &TransportSettings,
    ) -> Result<Self, TransportError> {
        if settings.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the proxy transport");
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .proxy(proxy)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            client,
            headers,
            fetch_timeout: Duration::from_secs(settings.fetch_timeout_secs),
        })
    }

    /// Anything other than a 200 from the probe means the proxy is unusable.
    pub fn probe(&self, probe: &Probe) -> Result<(), TransportError> {
        let resp = self
            .client
            .get(&probe.url)
            .headers(self.headers.clone())
            .timeout(probe.timeout)
            .send()
            .map_err(|e| TransportError::ProbeFailed(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(TransportError::ProbeFailed(format!(
                "{} answered {status}",
                probe.url
            )));
        }

        Ok(())
    }

    pub fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        let start = Instant::now();

        let resp = self
            .client
            .get(url.as_str())
            .headers(self.headers.clone())
            .timeout(self.fetch_timeout)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text()?;
        info!(%url, bytes = text.len(), elapsed = ?start.elapsed(), "Search page fetched");
        Ok(text)
    }
}

/// Plain GET through an authenticated forward proxy, optionally probed first.
pub struct ProxyTransport {
    client: ProxiedClient,
    base: Url,
    probe: Option<Probe>,
}

impl ProxyTransport {
    pub fn direct(settings: &TransportSettings) -> Result<Self, TransportError> {
        Self::build(settings, None)
    }

    pub fn probed(settings: &TransportSettings) -> Result<Self, TransportError> {
        let probe = Probe {
            url: settings.probe_url.clone(),
            timeout: Duration::from_secs(settings.probe_timeout_secs),
        };
        Self::build(settings, Some(probe))
    }

    fn build(settings: &TransportSettings, probe: Option<Probe>) -> Result<Self, TransportError> {
        let proxy_url = settings
            .proxy
            .url
            .as_deref()
            .ok_or_else(|| TransportError::Config("transport.proxy.url is not set".into()))?;

        let mut proxy =
            Proxy::all(proxy_url).map_err(|e| TransportError::Config(e.to_string()))?;
        if let Some(username) = &settings.proxy.username {
            let password = settings.proxy.password.as_deref().unwrap_or_default();
            proxy = proxy.basic_auth(username, password);
        }

        Ok(Self {
            client: ProxiedClient::new(proxy, HeaderMap::new(), settings)?,
            base: parse_base(settings)?,
            probe,
        })
    }
}

impl Transport for ProxyTransport {
    fn name(&self) -> &'static str {
        if self.probe.is_some() {
            "probed-proxy"
        } else {
            "direct-proxy"
        }
    }

    fn fetch_listings_html(&self, location: &str) -> Result<String, TransportError> {
        let url = search_url(&self.base, location)?;

        if let Some(probe) = &self.probe {
            self.client.probe(probe)?;
        }

        self.client.get_text(&url)
    }
}
