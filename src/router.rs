use crate::domain::FilterParameters;
use crate::errors::ServerError;
use crate::pipeline::Pipeline;
use crate::responses::{html_response, json_response, ResultResp};
use crate::spreadsheets::export_rows_xlsx;
use crate::templates;
use astra::Request;
use std::collections::HashMap;

pub fn handle(req: Request, pipeline: &Pipeline) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::home_page()),

        ("GET", "/listings") => {
            let params = parse_params(&parse_query(query))?;
            let report = pipeline.run(&params);
            html_response(templates::pages::listings_page(&params, &report, query))
        }

        ("GET", "/listings.xlsx") => {
            let params = parse_params(&parse_query(query))?;
            let report = pipeline.run(&params);
            export_rows_xlsx(&report.rows, &params.location)
        }

        ("GET", "/listings.json") => {
            let params = parse_params(&parse_query(query))?;
            let report = pipeline.run(&params);
            json_response(&serde_json::json!({
                "rows": report.rows,
                "skipped": report.skipped.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "error": report.failure.map(|f| f.to_string()),
            }))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Form values to run parameters. Missing fields take the form defaults;
/// percent fields are converted to fractions.
fn parse_params(q: &HashMap<String, String>) -> Result<FilterParameters, ServerError> {
    let defaults = FilterParameters::default();

    let location = q
        .get("location")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("location is required".into()))?;

    let max_price = match q.get("max_price").map(|s| s.trim()) {
        None | Some("") => None,
        Some(raw) => Some(parse_field::<u64>("max_price", raw)?),
    };

    let params = FilterParameters {
        location,
        max_price,
        loan_term_years: optional_field(q, "loan_term")?.unwrap_or(defaults.loan_term_years),
        interest_rate: optional_field::<f64>(q, "interest_rate")?
            .map(|pct| pct / 100.0)
            .unwrap_or(defaults.interest_rate),
        down_payment_pct: optional_field::<f64>(q, "down_payment")?
            .map(|pct| pct / 100.0)
            .unwrap_or(defaults.down_payment_pct),
        max_mortgage_to_rent_ratio: optional_field(q, "max_ratio")?
            .unwrap_or(defaults.max_mortgage_to_rent_ratio),
    };

    params
        .validate()
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    Ok(params)
}

fn optional_field<T: std::str::FromStr>(
    q: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, ServerError> {
    match q.get(name).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => parse_field(name, raw).map(Some),
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("{name} is not a valid number: {raw}")))
}
