use thiserror::Error;

/// Anything that stops the search page from being retrieved.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("proxy test failed: {0}")]
    ProbeFailed(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Transport misconfigured: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

/// Why a single listing card was dropped. Never escapes the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionSkip {
    #[error("missing price")]
    MissingPrice,
    #[error("missing rent estimate")]
    MissingRent,
    #[error("missing link")]
    MissingLink,
    #[error("unparsable amount: {0:?}")]
    BadNumber(String),
    #[error("unresolvable link: {0:?}")]
    BadLink(String),
}
