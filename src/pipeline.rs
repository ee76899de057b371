// src/pipeline.rs

use crate::domain::{filter_candidates, FilterParameters, InvalidParameters, ResultRow};
use crate::scraper::{extract_candidates, ExtractionSkip, Transport, TransportError};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Why a run came back without rows.
#[derive(Debug, Error)]
pub enum RunFailure {
    #[error("Error fetching listings: {0}")]
    Transport(#[from] TransportError),
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] InvalidParameters),
}

/// Outcome of one run. `failure` is set only when no rows could be produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub rows: Vec<ResultRow>,
    /// Why each dropped listing card was dropped, in page order.
    pub skipped: Vec<ExtractionSkip>,
    pub failure: Option<RunFailure>,
}

impl RunReport {
    fn failed(failure: RunFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }
}

/// Fetch → extract → filter, with exactly one transport.
pub struct Pipeline {
    transport: Box<dyn Transport>,
    base: Url,
}

impl Pipeline {
    /// `base` is the listing site's origin, used to absolutise listing links.
    pub fn new(transport: Box<dyn Transport>, base: Url) -> Self {
        Self { transport, base }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Never errors: failures come back inside the report with no rows.
    pub fn run(&self, params: &FilterParameters) -> RunReport {
        if let Err(e) = params.validate() {
            warn!("Rejected parameters: {e}");
            return RunReport::failed(e.into());
        }

        let start = Instant::now();
        info!(
            location = %params.location,
            transport = self.transport.name(),
            "Fetching listings"
        );

        let html = match self.transport.fetch_listings_html(&params.location) {
            Ok(html) => html,
            Err(e) => {
                warn!("Fetch failed: {e}");
                return RunReport::failed(e.into());
            }
        };

        let extraction = extract_candidates(&html, &self.base);

        let rows = match filter_candidates(&extraction.candidates, params) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Filter rejected parameters: {e}");
                return RunReport {
                    skipped: extraction.skipped,
                    ..RunReport::failed(e.into())
                };
            }
        };

        info!(
            candidates = extraction.candidates.len(),
            skipped = extraction.skipped.len(),
            matched = rows.len(),
            elapsed = ?start.elapsed(),
            "Run complete"
        );

        RunReport {
            rows,
            skipped: extraction.skipped,
            failure: None,
        }
    }
}
