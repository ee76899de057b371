// templates/pages/home.rs

use crate::domain::FilterParameters;
use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Mortgage vs Rent",
        html! {
            h1 { "Mortgage vs Rent Dashboard" }
            (search_form(&FilterParameters::default()))
        },
    )
}

/// Parameter form, pre-filled from `params`. Percent fields are shown as
/// percents and converted back to fractions by the router.
pub fn search_form(params: &FilterParameters) -> Markup {
    let max_price = params.max_price.map(|p| p.to_string()).unwrap_or_default();
    let rate_pct = format!("{:.1}", params.interest_rate * 100.0);
    let down_pct = format!("{:.1}", params.down_payment_pct * 100.0);
    let ratio = format!("{:.2}", params.max_mortgage_to_rent_ratio);

    card(
        "Search",
        html! {
            form action="/listings" method="get" {
                div class="form-grid" {
                    label {
                        "Location (City, State)"
                        input type="text" name="location" required value=(params.location);
                    }
                    label {
                        "Max Home Price"
                        input type="number" name="max_price" min="50000" max="2000000" step="50000" value=(max_price);
                    }
                    label {
                        "Loan Term (years)"
                        input type="number" name="loan_term" min="10" max="40" value=(params.loan_term_years);
                    }
                    label {
                        "Interest Rate (%)"
                        input type="number" name="interest_rate" min="1" max="10" step="0.1" value=(rate_pct);
                    }
                    label {
                        "Down Payment (%)"
                        input type="number" name="down_payment" min="0" max="50" step="0.5" value=(down_pct);
                    }
                    label {
                        "Max Mortgage-to-Rent Ratio"
                        input type="number" name="max_ratio" min="0.5" max="1" step="0.01" value=(ratio);
                    }
                }
                p { button type="submit" { "Find listings" } }
            }
        },
    )
}
