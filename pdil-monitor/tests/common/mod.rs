#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use pdil_core::{record::fields, Paginator, Record, UnitCatalog};
use pdil_monitor::app::{create_router, AppState};
use pdil_monitor::dataset::DatasetStore;
use pdil_monitor::error::{PhotoError, SourceError};
use pdil_monitor::export::{CsvTabularWriter, ZipArchiveBuilder, ARCHIVE_FOLDER};
use pdil_monitor::photos::PhotoFetcher;
use pdil_monitor::source::RowSource;

pub struct StaticRowSource {
    records: Option<Vec<Record>>,
}

impl StaticRowSource {
    pub fn new(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            records: Some(records),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { records: None })
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_rows(&self) -> Result<Vec<Record>, SourceError> {
        match &self.records {
            Some(records) => Ok(records.clone()),
            None => Err(SourceError::Io(std::io::Error::other("sheet unavailable"))),
        }
    }

    fn describe(&self) -> String {
        "static rows".to_string()
    }
}

pub struct MockPhotoFetcher {
    photos: HashMap<String, Bytes>,
    broken: Vec<String>,
    requested: Mutex<Vec<String>>,
}

impl MockPhotoFetcher {
    pub fn new() -> Arc<Self> {
        Self::with_photos(&[])
    }

    pub fn with_photos(photos: &[(&str, &'static [u8])]) -> Arc<Self> {
        Arc::new(Self {
            photos: photos
                .iter()
                .map(|(name, contents)| (name.to_string(), Bytes::from_static(contents)))
                .collect(),
            broken: vec!["broken.jpg".to_string()],
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl PhotoFetcher for MockPhotoFetcher {
    async fn fetch(&self, name: &str) -> Result<Option<Bytes>, PhotoError> {
        self.requested.lock().push(name.to_string());
        if self.broken.iter().any(|b| b == name) {
            return Err(PhotoError::Status {
                name: name.to_string(),
                status: 500,
            });
        }
        Ok(self.photos.get(name).cloned())
    }
}

pub struct TestHarness {
    pub dataset: Arc<DatasetStore>,
    pub photos: Arc<MockPhotoFetcher>,
    app: Router,
}

impl TestHarness {
    /// A harness whose dataset is already loaded with `records`.
    pub async fn new(records: Vec<Record>) -> Self {
        Self::builder().with_records(records).build().await
    }

    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn body_bytes(response: Response<Body>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let body = Self::body_bytes(response).await;
        serde_json::from_slice(&body).unwrap()
    }
}

pub struct TestHarnessBuilder {
    source: Arc<dyn RowSource>,
    photos: Arc<MockPhotoFetcher>,
    catalog: UnitCatalog,
    page_size: usize,
    load: bool,
}

impl Default for TestHarnessBuilder {
    fn default() -> Self {
        Self {
            source: StaticRowSource::new(Vec::new()),
            photos: MockPhotoFetcher::new(),
            catalog: UnitCatalog::default(),
            page_size: 50,
            load: true,
        }
    }
}

impl TestHarnessBuilder {
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.source = StaticRowSource::new(records);
        self
    }

    pub fn with_failing_source(mut self) -> Self {
        self.source = StaticRowSource::failing();
        self
    }

    pub fn with_photos(mut self, photos: Arc<MockPhotoFetcher>) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_catalog(mut self, catalog: UnitCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Leaves the dataset in its initial loading state.
    pub fn unloaded(mut self) -> Self {
        self.load = false;
        self
    }

    pub async fn build(self) -> TestHarness {
        let dataset = Arc::new(DatasetStore::new(self.source));
        if self.load {
            dataset.reload().await;
        }

        let state = AppState {
            dataset: dataset.clone(),
            photos: self.photos.clone(),
            writer: Arc::new(CsvTabularWriter),
            archive: Arc::new(ZipArchiveBuilder::new(ARCHIVE_FOLDER)),
            catalog: Arc::new(self.catalog),
            paginator: Paginator::new(self.page_size),
            photo_fetch_concurrency: 4,
        };

        TestHarness {
            dataset,
            photos: self.photos,
            app: create_router(state, false),
        }
    }
}

pub fn meter_row(
    unit: &str,
    ulp: &str,
    nama: &str,
    petugas: &str,
    ket_pdil: &str,
    file_foto: &str,
) -> Record {
    Record::new()
        .with(fields::UNIT, unit)
        .with(fields::ULP, ulp)
        .with(fields::ID_PELANGGAN, format!("5381{}", nama.len()))
        .with(fields::NAMA, nama)
        .with(fields::PBM, "PBM-01")
        .with(fields::PETUGAS, petugas)
        .with(fields::JENIS_KWH, "LPB")
        .with(fields::KET_PDIL, ket_pdil)
        .with(fields::FILE_FOTO, file_foto)
}
