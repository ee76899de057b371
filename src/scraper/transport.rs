// transport.rs
use crate::scraper::browser::HeadlessTransport;
use crate::scraper::proxy::ProxyTransport;
use crate::scraper::unblocker::UnblockerTransport;
use crate::scraper::TransportError;
use crate::settings::{TransportKind, TransportSettings};
use url::Url;

/// A way of getting the raw search-results page for a location.
///
/// Implementations block until the page is retrieved or their timeout
/// elapses. They are swapped, never layered.
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch_listings_html(&self, location: &str) -> Result<String, TransportError>;
}

/// `<base>/homes/<location>/`, with spaces turned into dashes and the
/// location encoded as a single path segment.
pub fn search_url(base: &Url, location: &str) -> Result<Url, TransportError> {
    let slug = location.trim().replace(' ', "-");

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| TransportError::Config(format!("base url cannot hold a path: {base}")))?
        .clear()
        .extend(["homes", slug.as_str(), ""]);

    Ok(url)
}

pub fn build_transport(
    settings: &TransportSettings,
) -> Result<Box<dyn Transport>, TransportError> {
    let transport: Box<dyn Transport> = match settings.kind {
        TransportKind::DirectProxy => Box::new(ProxyTransport::direct(settings)?),
        TransportKind::ProbedProxy => Box::new(ProxyTransport::probed(settings)?),
        TransportKind::UnblockingApi => Box::new(UnblockerTransport::new(settings)?),
        TransportKind::HeadlessRender => Box::new(HeadlessTransport::new(settings)?),
    };

    Ok(transport)
}

pub(crate) fn parse_base(settings: &TransportSettings) -> Result<Url, TransportError> {
    Url::parse(&settings.base_url)
        .map_err(|e| TransportError::Config(format!("bad base_url {}: {e}", settings.base_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.zillow.com").unwrap()
    }

    #[test]
    fn search_url_dashes_spaces() {
        let url = search_url(&base(), "Portland, OR").unwrap();
        assert_eq!(url.as_str(), "https://www.zillow.com/homes/Portland,-OR/");
    }

    #[test]
    fn search_url_keeps_location_in_one_segment() {
        let url = search_url(&base(), " Austin/TX ?x ").unwrap();
        assert_eq!(url.as_str(), "https://www.zillow.com/homes/Austin%2FTX-%3Fx/");
    }

    #[test]
    fn search_url_replaces_existing_path() {
        let base = Url::parse("http://listings.test/ignored/path").unwrap();
        let url = search_url(&base, "Boise ID").unwrap();
        assert_eq!(url.as_str(), "http://listings.test/homes/Boise-ID/");
    }

    #[test]
    fn factory_picks_configured_kind() {
        let mut settings = TransportSettings::default();
        settings.proxy.url = Some("http://proxy.local:22225".into());
        assert_eq!(build_transport(&settings).unwrap().name(), "direct-proxy");

        settings.kind = TransportKind::ProbedProxy;
        assert_eq!(build_transport(&settings).unwrap().name(), "probed-proxy");

        settings.kind = TransportKind::UnblockingApi;
        settings.unblocker.endpoint = Some("http://unblocker.local:22225".into());
        settings.unblocker.api_key = Some("key".into());
        assert_eq!(build_transport(&settings).unwrap().name(), "unblocking-api");

        settings.kind = TransportKind::HeadlessRender;
        assert_eq!(build_transport(&settings).unwrap().name(), "headless-render");
    }

    #[test]
    fn factory_rejects_missing_proxy() {
        let settings = TransportSettings::default();
        assert!(matches!(
            build_transport(&settings),
            Err(TransportError::Config(_))
        ));
    }
}
