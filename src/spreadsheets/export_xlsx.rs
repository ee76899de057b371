use crate::domain::ResultRow;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use chrono::Local;
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 5] = [
    "Price",
    "Mortgage",
    "Rent Estimate",
    "Mortgage-to-Rent Ratio",
    "URL",
];

/// Builds the workbook bytes for a result table, one row per listing.
pub fn rows_workbook(rows: &[ResultRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, row.price as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;

        worksheet
            .write_number(r, 1, row.mortgage_monthly)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write mortgage: {}", e)))?;

        worksheet
            .write_number(r, 2, row.rent_estimate as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write rent: {}", e)))?;

        worksheet
            .write_number(r, 3, row.mortgage_to_rent_ratio)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write ratio: {}", e)))?;

        worksheet
            .write_url(r, 4, row.url.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write url: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_rows_xlsx(rows: &[ResultRow], location: &str) -> ResultResp {
    let buffer = rows_workbook(rows)?;
    xlsx_response(buffer, &export_filename(location))
}

/// `listings_portland-or_20261018.xlsx`
fn export_filename(location: &str) -> String {
    let slug: String = location
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect();

    format!("listings_{}_{}.xlsx", slug, Local::now().format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_header_safe() {
        let name = export_filename(r#" Portland, OR "quoted" "#);
        assert!(name.starts_with("listings_portland-or-quoted_"));
        assert!(name.ends_with(".xlsx"));
        assert!(!name.contains('"'));
    }

    #[test]
    fn workbook_is_a_zip() {
        let rows = vec![ResultRow {
            price: 250_000,
            mortgage_monthly: 1330.6,
            rent_estimate: 2_900,
            mortgage_to_rent_ratio: 0.46,
            url: "https://www.zillow.com/homedetails/2_zpid/".into(),
        }];

        let bytes = rows_workbook(&rows).unwrap();

        assert_eq!(&bytes[..2], b"PK");
    }
}
