use std::{collections::HashSet, path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use pdil_core::{record::fields, Record};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::PhotoError;
use crate::metrics_consts::{PHOTO_FETCH_FAILURES, PHOTO_FETCH_MISSING};

/// Looks up a meter photo by its `FILE FOTO` name.
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// `Ok(None)` means the photo does not exist.
    async fn fetch(&self, name: &str) -> Result<Option<Bytes>, PhotoError>;
}

/// A photo name must be a single path segment. Anything that could name
/// the photo root itself or step out of it is never looked up.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Photos served by a plain HTTP file server.
pub struct HttpPhotoFetcher {
    pub base_url: Url,
    pub client: Client,
}

impl HttpPhotoFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PhotoError> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&base_url).map_err(|e| PhotoError::InvalidBaseUrl(e.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// The name is pushed as one percent-encoded segment, so `?`, `#` or a
    /// scheme-like prefix stay part of the file name.
    pub fn photo_url(&self, name: &str) -> Result<Url, PhotoError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PhotoError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(name);

        if url.scheme() != self.base_url.scheme() || url.host() != self.base_url.host() {
            return Err(PhotoError::InvalidBaseUrl(url.to_string()));
        }
        Ok(url)
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, name: &str) -> Result<Option<Bytes>, PhotoError> {
        if !is_safe_name(name) {
            return Ok(None);
        }
        let url = self.photo_url(name)?;

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.bytes().await?)),
            status => Err(PhotoError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

/// Photos stored flat in a local directory.
pub struct DirPhotoFetcher {
    pub root: PathBuf,
}

impl DirPhotoFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PhotoFetcher for DirPhotoFetcher {
    async fn fetch(&self, name: &str) -> Result<Option<Bytes>, PhotoError> {
        if !is_safe_name(name) {
            return Ok(None);
        }
        match tokio::fs::read(self.root.join(name)).await {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn from_config(config: &Config) -> Result<Arc<dyn PhotoFetcher>, PhotoError> {
    match &config.photo_base_url {
        Some(base_url) => Ok(Arc::new(HttpPhotoFetcher::new(
            base_url,
            config.fetch_timeout(),
        )?)),
        None => Ok(Arc::new(DirPhotoFetcher::new(&config.photo_dir))),
    }
}

/// Distinct, non-empty photo names of a listing, in first-appearance order.
pub fn photo_names(records: &[&Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.get(fields::FILE_FOTO))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Fetches every name once, at most `concurrency` at a time. Missing or
/// failed photos are dropped; the rest keep the order of `names`.
pub async fn fetch_all(
    fetcher: &dyn PhotoFetcher,
    names: Vec<String>,
    concurrency: usize,
) -> Vec<(String, Bytes)> {
    let requested = names.len();
    let fetched: Vec<(String, Bytes)> = stream::iter(names)
        .map(|name| async move {
            match fetcher.fetch(&name).await {
                Ok(Some(contents)) => Some((name, contents)),
                Ok(None) => {
                    debug!("Photo {} not found, skipping", name);
                    metrics::counter!(PHOTO_FETCH_MISSING).increment(1);
                    None
                }
                Err(e) => {
                    warn!("Failed to fetch photo {}: {:?}, skipping", name, e);
                    metrics::counter!(PHOTO_FETCH_FAILURES).increment(1);
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(|entry| async move { entry })
        .collect()
        .await;

    debug!("Fetched {} of {} photos", fetched.len(), requested);
    fetched
}
