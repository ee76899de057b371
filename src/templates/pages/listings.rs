// templates/pages/listings.rs

use crate::domain::{FilterParameters, ResultRow};
use crate::pipeline::RunReport;
use crate::templates::desktop_layout;
use crate::templates::pages::search_form;
use maud::{html, Markup};

/// Results for one run. `query` is the raw query string, reused for the
/// export links so they re-run the same search.
pub fn listings_page(params: &FilterParameters, report: &RunReport, query: &str) -> Markup {
    desktop_layout(
        "Filtered Listings",
        html! {
            (search_form(params))

            @if let Some(failure) = &report.failure {
                p class="error" { (failure) }
            }
            @if !report.skipped.is_empty() {
                div class="notice" {
                    p { "Skipped " (report.skipped.len()) " listing(s) with missing data." }
                    ul {
                        @for skip in &report.skipped {
                            li { "Skipping listing due to error: " (skip) }
                        }
                    }
                }
            }

            @if report.rows.is_empty() {
                p { "No listings found matching criteria." }
            } @else {
                h3 { "Filtered Listings" }
                p {
                    "Found " strong { (report.rows.len()) } " listing(s). "
                    a href=(format!("/listings.xlsx?{query}")) { "Download XLSX" }
                    " · "
                    a href=(format!("/listings.json?{query}")) { "JSON" }
                }
                (results_table(&report.rows))
            }
        },
    )
}

fn results_table(rows: &[ResultRow]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Price" }
                    th { "Mortgage" }
                    th { "Rent Estimate" }
                    th { "Mortgage-to-Rent Ratio" }
                    th { "URL" }
                }
            }
            tbody {
                @for row in rows {
                    tr {
                        td { "$" (row.price) }
                        td { (format!("${:.2}", row.mortgage_monthly)) }
                        td { "$" (row.rent_estimate) }
                        td { (format!("{:.2}", row.mortgage_to_rent_ratio)) }
                        td { a href=(row.url) target="_blank" rel="noopener" { (row.url) } }
                    }
                }
            }
        }
    }
}
