// unblocker.rs
use crate::scraper::proxy::{Probe, ProxiedClient};
use crate::scraper::transport::{parse_base, search_url, Transport};
use crate::scraper::TransportError;
use crate::settings::TransportSettings;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Proxy;
use std::time::Duration;
use url::Url;

/// Routes through a commercial unblocking proxy. The API key travels in an
/// `Authorization` header rather than in the proxy URL. The header is set on
/// the probe and the fetch individually, both of which go through the
/// unblocker endpoint; the probe's `probe_url` therefore sees it too.
pub struct UnblockerTransport {
    client: ProxiedClient,
    base: Url,
    probe: Probe,
}

impl UnblockerTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let endpoint = settings.unblocker.endpoint.as_deref().ok_or_else(|| {
            TransportError::Config("transport.unblocker.endpoint is not set".into())
        })?;
        let api_key = settings.unblocker.api_key.as_deref().ok_or_else(|| {
            TransportError::Config("transport.unblocker.api_key is not set".into())
        })?;

        let mut auth = HeaderValue::from_str(&format!("Basic {api_key}"))
            .map_err(|_| TransportError::Config("api key is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let proxy = Proxy::all(endpoint).map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self {
            client: ProxiedClient::new(proxy, headers, settings)?,
            base: parse_base(settings)?,
            probe: Probe {
                url: settings.probe_url.clone(),
                timeout: Duration::from_secs(settings.probe_timeout_secs),
            },
        })
    }
}

impl Transport for UnblockerTransport {
    fn name(&self) -> &'static str {
        "unblocking-api"
    }

    fn fetch_listings_html(&self, location: &str) -> Result<String, TransportError> {
        let url = search_url(&self.base, location)?;
        self.client.probe(&self.probe)?;
        self.client.get_text(&url)
    }
}
