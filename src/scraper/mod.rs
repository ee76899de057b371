mod browser;
mod extract;
mod models;
mod proxy;
mod scraper_error;
mod transport;
mod unblocker;

pub use extract::extract_candidates;
pub use models::{Extraction, ListingCandidate};
pub use scraper_error::{ExtractionSkip, TransportError};
pub use transport::{build_transport, Transport};
