// src/domain/mortgage.rs

use crate::domain::InvalidParameters;

/// Longest term accepted; keeps the compounding exponent well inside `i32`.
pub const MAX_TERM_YEARS: u32 = 100;

/// Rounds to cents, the precision every derived money figure is reported in.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed monthly payment for an amortized loan.
///
/// `down_payment_pct` and `annual_interest_rate` are fractions (0.20, 0.07).
/// A zero rate falls back to straight division of the principal, and a
/// non-positive term is rejected instead of producing `inf`/`NaN`.
pub fn calculate_mortgage(
    home_price: f64,
    down_payment_pct: f64,
    annual_interest_rate: f64,
    loan_term_years: u32,
) -> Result<f64, InvalidParameters> {
    if !home_price.is_finite() || home_price < 0.0 {
        return Err(InvalidParameters::out_of_range("home_price", home_price));
    }
    if !(0.0..=1.0).contains(&down_payment_pct) {
        return Err(InvalidParameters::out_of_range(
            "down_payment_pct",
            down_payment_pct,
        ));
    }
    if !(0.0..=1.0).contains(&annual_interest_rate) {
        return Err(InvalidParameters::out_of_range(
            "interest_rate",
            annual_interest_rate,
        ));
    }

    if loan_term_years == 0 {
        return Err(InvalidParameters::NonPositiveTerm);
    }
    if loan_term_years > MAX_TERM_YEARS {
        return Err(InvalidParameters::out_of_range(
            "loan_term_years",
            loan_term_years as f64,
        ));
    }
    let num_payments = loan_term_years * 12;

    let loan_amount = home_price * (1.0 - down_payment_pct);
    let monthly_rate = annual_interest_rate / 12.0;

    let growth = (1.0 + monthly_rate).powi(num_payments as i32);

    // Rates too small to move `growth` off 1.0 are treated as zero.
    let payment = if monthly_rate == 0.0 || growth == 1.0 {
        loan_amount / num_payments as f64
    } else {
        loan_amount * monthly_rate * growth / (growth - 1.0)
    };

    if !payment.is_finite() {
        return Err(InvalidParameters::out_of_range(
            "interest_rate",
            annual_interest_rate,
        ));
    }

    Ok(round2(payment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_amortization() {
        // 240k financed at 7% over 30 years
        let payment = calculate_mortgage(300_000.0, 0.20, 0.07, 30).unwrap();
        assert!((payment - 1596.73).abs() <= 0.01, "got {payment}");
    }

    #[test]
    fn zero_rate_is_straight_division() {
        let payment = calculate_mortgage(120_000.0, 0.0, 0.0, 10).unwrap();
        assert_eq!(payment, 1000.00);
    }

    #[test]
    fn zero_term_is_rejected() {
        let err = calculate_mortgage(300_000.0, 0.20, 0.07, 0).unwrap_err();
        assert_eq!(err, InvalidParameters::NonPositiveTerm);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert!(calculate_mortgage(-1.0, 0.2, 0.07, 30).is_err());
        assert!(calculate_mortgage(f64::NAN, 0.2, 0.07, 30).is_err());
        assert!(calculate_mortgage(300_000.0, 1.5, 0.07, 30).is_err());
        assert!(calculate_mortgage(300_000.0, 0.2, -0.01, 30).is_err());
        assert!(calculate_mortgage(300_000.0, 0.2, 0.07, MAX_TERM_YEARS + 1).is_err());
    }

    #[test]
    fn vanishing_rate_behaves_like_zero() {
        let payment = calculate_mortgage(120_000.0, 0.0, 1e-300, 10).unwrap();
        assert_eq!(payment, 1000.00);
    }

    #[test]
    fn full_down_payment_means_no_payment() {
        assert_eq!(calculate_mortgage(300_000.0, 1.0, 0.07, 30).unwrap(), 0.0);
    }

    #[test]
    fn monotonic_in_price() {
        let mut last = 0.0;
        for price in (50_000..=2_000_000).step_by(50_000) {
            let payment = calculate_mortgage(price as f64, 0.2, 0.07, 30).unwrap();
            assert!(payment > last, "{price}: {payment} <= {last}");
            last = payment;
        }
    }

    #[test]
    fn monotonic_in_rate() {
        let mut last = 0.0;
        for bps in (0..=1000).step_by(25) {
            let rate = bps as f64 / 10_000.0;
            let payment = calculate_mortgage(400_000.0, 0.2, rate, 30).unwrap();
            assert!(payment > last, "{rate}: {payment} <= {last}");
            last = payment;
        }
    }

    #[test]
    fn round2_keeps_cents() {
        assert_eq!(round2(0.8316), 0.83);
        assert_eq!(round2(2661.209980716729), 2661.21);
    }
}
