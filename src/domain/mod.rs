pub mod affordability;
pub mod mortgage;

pub use affordability::{filter_candidates, FilterParameters, ResultRow};

use thiserror::Error;

/// Numeric input that cannot produce a meaningful payment or ratio.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameters {
    #[error("loan term must be at least one year")]
    NonPositiveTerm,
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("location must not be empty")]
    EmptyLocation,
}

impl InvalidParameters {
    pub fn out_of_range(field: &'static str, value: f64) -> Self {
        InvalidParameters::OutOfRange { field, value }
    }
}
