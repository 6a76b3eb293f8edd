use std::time::Duration;

use async_trait::async_trait;
use pdil_core::Record;
use reqwest::Client;
use tracing::info;

use super::{parse_csv, RowSource};
use crate::error::SourceError;

/// Published-sheet CSV export fetched over HTTP.
pub struct UrlCsvSource {
    pub url: String,
    pub client: Client,
}

impl UrlCsvSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl RowSource for UrlCsvSource {
    async fn fetch_rows(&self) -> Result<Vec<Record>, SourceError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        info!("Fetched {} bytes of CSV from {}", body.len(), self.url);
        parse_csv(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
