// extract.rs
use crate::scraper::{Extraction, ExtractionSkip, ListingCandidate};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info};
use url::Url;

// One search-result card per <article>.
static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article").expect("card selector"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"span.PropertyCardPrice, [data-test="property-card-price"]"#)
        .expect("price selector")
});
static RENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.RentEstimate").expect("rent selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector"));

/// Pulls every complete listing card out of a search-results page.
///
/// Cards are read independently: a card missing its price, rent estimate or
/// link has its reason recorded in `skipped` and the rest of the page is still read.
pub fn extract_candidates(html: &str, base: &Url) -> Extraction {
    let document = Html::parse_document(html);
    let mut extraction = Extraction::default();

    for (index, card) in document.select(&CARD).filter(is_top_level).enumerate() {
        match read_card(card, base) {
            Ok(candidate) => extraction.candidates.push(candidate),
            Err(skip) => {
                debug!(index, reason = %skip, "Skipping listing");
                extraction.skipped.push(skip);
            }
        }
    }

    info!(
        parsed = extraction.candidates.len(),
        skipped = extraction.skipped.len(),
        "Listings parsed"
    );

    extraction
}

fn is_top_level(card: &ElementRef<'_>) -> bool {
    !card
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().name() == "article")
}

fn read_card(card: ElementRef<'_>, base: &Url) -> Result<ListingCandidate, ExtractionSkip> {
    let price = first_text(card, &PRICE).ok_or(ExtractionSkip::MissingPrice)?;
    let price = parse_amount(&price)?;

    let rent = first_text(card, &RENT).ok_or(ExtractionSkip::MissingRent)?;
    let rent = parse_amount(&rent)?;

    let href = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(ExtractionSkip::MissingLink)?;
    let url = base
        .join(href.trim())
        .map_err(|_| ExtractionSkip::BadLink(href.to_string()))?;

    Ok(ListingCandidate {
        price,
        rent_estimate: Some(rent),
        url: url.into(),
    })
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

/// Parses display amounts like `$450,000+` or `$2,100/mo` into whole dollars.
pub fn parse_amount(text: &str) -> Result<u64, ExtractionSkip> {
    let head = text.split('+').next().unwrap_or_default();
    let head = head.trim().trim_end_matches("/mo");

    let digits: String = head
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    digits
        .parse::<u64>()
        .map_err(|_| ExtractionSkip::BadNumber(text.trim().to_string()))
}
