// src/tests/router_tests/export_tests.rs

use crate::pipeline::tests::SEARCH_PAGE;
use crate::router::handle;
use crate::tests::utils::{body_bytes, body_string, failing_pipeline, get, pipeline_with};

#[test]
fn xlsx_export_is_a_download() {
    let uri = "/listings.xlsx?location=Portland%2C+OR&max_ratio=0.85";
    let resp = handle(get(uri), &pipeline_with(SEARCH_PAGE)).unwrap();

    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"listings_portland-or_"));

    let bytes = body_bytes(resp);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn json_export_lists_rows_in_page_order() {
    let uri = "/listings.json?location=Portland%2C+OR&max_ratio=0.85";
    let resp = handle(get(uri), &pipeline_with(SEARCH_PAGE)).unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["price"], 500_000);
    assert_eq!(rows[0]["mortgage_to_rent_ratio"], 0.83);
    assert_eq!(rows[1]["price"], 250_000);
    assert_eq!(json["skipped"], serde_json::json!(["missing rent estimate"]));
    assert!(json["error"].is_null());
}

#[test]
fn json_export_surfaces_transport_error() {
    let uri = "/listings.json?location=Boise";
    let resp = handle(get(uri), &failing_pipeline()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 0);
    assert!(json["error"].as_str().unwrap().contains("connection reset"));
}
