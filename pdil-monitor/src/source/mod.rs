use std::sync::Arc;

use async_trait::async_trait;
use pdil_core::Record;

use crate::config::Config;
use crate::error::SourceError;

pub mod file;
pub mod url;

pub use file::FileCsvSource;
pub use url::UrlCsvSource;

/// Yields the raw dataset for one load cycle.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Record>, SourceError>;

    /// Human readable origin, for logs.
    fn describe(&self) -> String;
}

/// Parses a header-first CSV document into records.
///
/// Blank lines are skipped and ragged rows are accepted: a row shorter
/// than the header leaves its trailing columns absent, extra cells
/// without a header are dropped. Invalid UTF-8 is replaced cell by cell
/// rather than failing the load.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Record>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let mut records = Vec::new();

    for row in reader.byte_records() {
        let row = row?;
        if row.len() == 1 && row.get(0) == Some(&b""[..]) {
            continue;
        }
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.as_str(), String::from_utf8_lossy(cell)))
                .collect(),
        );
    }

    Ok(records)
}

pub fn from_config(config: &Config) -> Result<Arc<dyn RowSource>, SourceError> {
    match &config.rows_file {
        Some(path) => Ok(Arc::new(FileCsvSource::new(path))),
        None => Ok(Arc::new(UrlCsvSource::new(
            config.sheet_url.clone(),
            config.fetch_timeout(),
        )?)),
    }
}
