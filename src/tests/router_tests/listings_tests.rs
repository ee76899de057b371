// src/tests/router_tests/listings_tests.rs

use crate::errors::ServerError;
use crate::pipeline::tests::SEARCH_PAGE;
use crate::router::handle;
use crate::tests::utils::{body_string, failing_pipeline, get, pipeline_with};

const QUERY: &str =
    "location=Portland%2C+OR&max_price=&loan_term=30&interest_rate=7&down_payment=20";

#[test]
fn home_shows_form_with_defaults() {
    let resp = handle(get("/"), &pipeline_with(SEARCH_PAGE)).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"action="/listings""#));
    assert!(body.contains("Portland, OR"));
    assert!(body.contains(r#"value="600000""#));
}

#[test]
fn listings_page_renders_matching_rows() {
    let uri = format!("/listings?{QUERY}&max_ratio=0.85");
    let resp = handle(get(&uri), &pipeline_with(SEARCH_PAGE)).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Filtered Listings"));
    assert!(body.contains("$2661.21"));
    assert!(body.contains("0.83"));
    assert!(body.contains("https://www.zillow.com/homedetails/2-Cheap-St/2_zpid/"));
    assert!(body.contains("Skipped 1 listing(s)"));
    assert!(body.contains("Skipping listing due to error: missing rent estimate"));
}

#[test]
fn strict_threshold_drops_the_expensive_listing() {
    let uri = format!("/listings?{QUERY}&max_ratio=0.80");
    let body = body_string(handle(get(&uri), &pipeline_with(SEARCH_PAGE)).unwrap());

    assert!(!body.contains("1-Good-St"));
    assert!(body.contains("2-Cheap-St"));
}

#[test]
fn transport_failure_renders_empty_table_with_message() {
    let uri = format!("/listings?{QUERY}");
    let resp = handle(get(&uri), &failing_pipeline()).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Error fetching listings"));
    assert!(body.contains("No listings found matching criteria."));
}

#[test]
fn missing_location_is_bad_request() {
    let err = handle(get("/listings?loan_term=30"), &pipeline_with(SEARCH_PAGE)).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(err.status(), 400);
}

#[test]
fn unknown_route_is_not_found() {
    let err = handle(get("/admin"), &pipeline_with(SEARCH_PAGE)).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
