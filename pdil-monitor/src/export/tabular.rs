use bytes::Bytes;
use pdil_core::{ExportRow, EXPORT_COLUMNS};

use super::Blob;
use crate::error::ExportError;

/// Encodes export rows into a downloadable table.
pub trait TabularWriter: Send + Sync {
    fn write(&self, rows: &[ExportRow], filename: &str) -> Result<Blob, ExportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTabularWriter;

impl TabularWriter for CsvTabularWriter {
    fn write(&self, rows: &[ExportRow], filename: &str) -> Result<Blob, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::with_capacity(rows.len() * 256));

        writer.write_record(EXPORT_COLUMNS)?;
        for row in rows {
            writer.write_record(row.cells())?;
        }

        let buffer = writer.into_inner().map_err(|e| e.into_error())?;

        Ok(Blob {
            filename: filename.to_string(),
            content_type: "text/csv; charset=utf-8",
            bytes: Bytes::from(buffer),
        })
    }
}
