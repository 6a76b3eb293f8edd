use std::path::PathBuf;

use async_trait::async_trait;
use pdil_core::Record;
use tracing::info;

use super::{parse_csv, RowSource};
use crate::error::SourceError;

/// A CSV export saved to local disk.
pub struct FileCsvSource {
    pub path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RowSource for FileCsvSource {
    async fn fetch_rows(&self) -> Result<Vec<Record>, SourceError> {
        let body = tokio::fs::read(&self.path).await?;
        info!("Read {} bytes of CSV from {:?}", body.len(), self.path);
        parse_csv(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
