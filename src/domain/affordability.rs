// src/domain/affordability.rs

use crate::domain::mortgage::{calculate_mortgage, round2, MAX_TERM_YEARS};
use crate::domain::InvalidParameters;
use crate::scraper::ListingCandidate;
use serde::Serialize;
use tracing::debug;

/// Inputs for one pipeline run. Percentages are already fractions here.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParameters {
    pub location: String,
    /// Optional ceiling; `None` keeps every price.
    pub max_price: Option<u64>,
    pub loan_term_years: u32,
    pub interest_rate: f64,
    pub down_payment_pct: f64,
    /// Inclusive upper bound on mortgage / rent.
    pub max_mortgage_to_rent_ratio: f64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            location: "Portland, OR".to_string(),
            max_price: Some(600_000),
            loan_term_years: 30,
            interest_rate: 0.07,
            down_payment_pct: 0.20,
            max_mortgage_to_rent_ratio: 0.8,
        }
    }
}

impl FilterParameters {
    /// Rejects anything the calculator or the ratio test could not handle.
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        if self.location.trim().is_empty() {
            return Err(InvalidParameters::EmptyLocation);
        }
        if self.loan_term_years == 0 {
            return Err(InvalidParameters::NonPositiveTerm);
        }
        if self.loan_term_years > MAX_TERM_YEARS {
            return Err(InvalidParameters::out_of_range(
                "loan_term_years",
                self.loan_term_years as f64,
            ));
        }
        if !(0.0..=1.0).contains(&self.interest_rate) {
            return Err(InvalidParameters::out_of_range(
                "interest_rate",
                self.interest_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.down_payment_pct) {
            return Err(InvalidParameters::out_of_range(
                "down_payment_pct",
                self.down_payment_pct,
            ));
        }
        let ratio = self.max_mortgage_to_rent_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(InvalidParameters::out_of_range(
                "max_mortgage_to_rent_ratio",
                ratio,
            ));
        }
        Ok(())
    }
}

/// One accepted listing, in the column order the table shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub price: u64,
    pub mortgage_monthly: f64,
    pub rent_estimate: u64,
    pub mortgage_to_rent_ratio: f64,
    pub url: String,
}

/// Keeps candidates whose rounded mortgage-to-rent ratio is within the
/// threshold. Order is preserved.
pub fn filter_candidates(
    candidates: &[ListingCandidate],
    params: &FilterParameters,
) -> Result<Vec<ResultRow>, InvalidParameters> {
    let mut rows = Vec::new();

    for candidate in candidates {
        if let Some(max_price) = params.max_price {
            if candidate.price > max_price {
                debug!(url = %candidate.url, price = candidate.price, "over max price");
                continue;
            }
        }

        // A zero rent estimate has no meaningful ratio.
        let rent = match candidate.rent_estimate {
            Some(rent) if rent > 0 => rent,
            _ => {
                debug!(url = %candidate.url, "no rent estimate");
                continue;
            }
        };

        let mortgage = calculate_mortgage(
            candidate.price as f64,
            params.down_payment_pct,
            params.interest_rate,
            params.loan_term_years,
        )?;
        let ratio = round2(mortgage / rent as f64);

        if ratio <= params.max_mortgage_to_rent_ratio {
            rows.push(ResultRow {
                price: candidate.price,
                mortgage_monthly: mortgage,
                rent_estimate: rent,
                mortgage_to_rent_ratio: ratio,
                url: candidate.url.clone(),
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(price: u64, rent: Option<u64>) -> ListingCandidate {
        ListingCandidate {
            price,
            rent_estimate: rent,
            url: format!("https://www.zillow.com/homedetails/{price}_zpid/"),
        }
    }

    fn params(threshold: f64) -> FilterParameters {
        FilterParameters {
            max_price: None,
            max_mortgage_to_rent_ratio: threshold,
            ..FilterParameters::default()
        }
    }

    #[test]
    fn reference_listing_flips_between_thresholds() {
        // 400k financed at 7%/30y is 2661.21 a month, 0.83 of 3200
        let listings = vec![candidate(500_000, Some(3_200))];

        assert!(filter_candidates(&listings, &params(0.80)).unwrap().is_empty());

        let rows = filter_candidates(&listings, &params(0.85)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mortgage_monthly, 2661.21);
        assert_eq!(rows[0].mortgage_to_rent_ratio, 0.83);
        assert_eq!(rows[0].rent_estimate, 3_200);
    }

    #[test]
    fn threshold_is_inclusive() {
        // Zero rate keeps the arithmetic exact: 96000 * 0.8 / 120 = 640
        let p = FilterParameters {
            interest_rate: 0.0,
            loan_term_years: 10,
            ..params(0.80)
        };
        let at = candidate(96_000, Some(800)); // 640 / 800 = 0.80
        let over = candidate(96_000, Some(790)); // 640 / 790 = 0.81

        let rows = filter_candidates(&[at, over], &p).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rent_estimate, 800);
        assert_eq!(rows[0].mortgage_to_rent_ratio, 0.80);
    }

    #[test]
    fn zero_or_missing_rent_is_excluded() {
        let listings = vec![candidate(100_000, Some(0)), candidate(100_000, None)];
        let rows = filter_candidates(&listings, &params(100.0)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn max_price_excludes_expensive_listings() {
        let listings = vec![candidate(700_000, Some(10_000)), candidate(300_000, Some(10_000))];
        let p = FilterParameters {
            max_price: Some(600_000),
            ..params(1.0)
        };
        let rows = filter_candidates(&listings, &p).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 300_000);
    }

    #[test]
    fn order_is_preserved() {
        let listings = vec![
            candidate(300_000, Some(5_000)),
            candidate(100_000, Some(5_000)),
            candidate(200_000, Some(5_000)),
        ];
        let prices: Vec<u64> = filter_candidates(&listings, &params(1.0))
            .unwrap()
            .into_iter()
            .map(|r| r.price)
            .collect();
        assert_eq!(prices, vec![300_000, 100_000, 200_000]);
    }

    #[test]
    fn validate_rejects_bad_input() {
        let zero_term = FilterParameters {
            loan_term_years: 0,
            ..FilterParameters::default()
        };
        assert_eq!(zero_term.validate(), Err(InvalidParameters::NonPositiveTerm));

        let blank = FilterParameters {
            location: "   ".into(),
            ..FilterParameters::default()
        };
        assert_eq!(blank.validate(), Err(InvalidParameters::EmptyLocation));

        let ratio = FilterParameters {
            max_mortgage_to_rent_ratio: 0.0,
            ..FilterParameters::default()
        };
        assert!(ratio.validate().is_err());

        assert!(FilterParameters::default().validate().is_ok());
    }
}
