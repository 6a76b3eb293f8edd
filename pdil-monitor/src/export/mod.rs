use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

pub mod archive;
pub mod tabular;

pub use archive::{ArchiveBuilder, ZipArchiveBuilder};
pub use tabular::{CsvTabularWriter, TabularWriter};

pub const EXPORT_FILENAME: &str = "Monitoring_PDIL.csv";
pub const ARCHIVE_FILENAME: &str = "PDIL_Foto.zip";
pub const ARCHIVE_FOLDER: &str = "PDIL_Foto";

/// An encoded file ready to hand to the client as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl IntoResponse for Blob {
    fn into_response(self) -> Response {
        let disposition = format!(
            "attachment; filename=\"{}\"",
            self.filename.replace('"', "")
        );
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}
