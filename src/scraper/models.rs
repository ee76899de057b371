use crate::scraper::ExtractionSkip;

/// One listing card that yielded a price, a rent estimate and a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCandidate {
    pub price: u64,
    pub rent_estimate: Option<u64>,
    pub url: String,
}

/// Extractor output: candidates in document order plus why each dropped card
/// was dropped, also in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<ListingCandidate>,
    pub skipped: Vec<ExtractionSkip>,
}
