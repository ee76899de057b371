// errors.rs
use thiserror::Error;

/// Errors surfaced to HTTP clients. Pipeline failures are not here: those
/// render as a normal page with an empty table.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error")]
    InternalError,
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::InternalError | ServerError::XlsxError(_) => 500,
        }
    }
}
