use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to fetch rows: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read rows file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rows as CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("invalid photo base url: {0}")]
    InvalidBaseUrl(String),

    #[error("photo request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("photo request for '{name}' returned {status}")]
    Status { name: String, status: u16 },

    #[error("failed to read photo: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Export failed"),
        };

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = ?self, "Request error");
        } else {
            tracing::error!(error = ?self, status = %status, "Request error");
        }

        let body = Json(json!({
            "error": message,
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
