//! Lifecycle of the loaded dataset.
//!
//! The store starts out `loading` with no records. Each load cycle issues a
//! single fetch against the row source and swaps in a whole new
//! [`RecordStore`]; a failed fetch swaps in an empty one. Either way the
//! store leaves the `loading` state, so readers never wait forever.
//!
//! Readers take a cheap [`Snapshot`] and derive every view from it, so a
//! reload in flight never changes a view halfway through a request.

use std::{sync::Arc, time::Duration, time::Instant};

use chrono::{DateTime, Utc};
use pdil_core::RecordStore;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{error, info};

use crate::metrics_consts::{DATASET_LOADS, DATASET_LOAD_DURATION, DATASET_RECORDS};
use crate::source::RowSource;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub loading: bool,
    pub records: Arc<RecordStore>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    fn loading() -> Self {
        Self {
            loading: true,
            records: Arc::new(RecordStore::empty()),
            loaded_at: None,
        }
    }
}

pub struct DatasetStore {
    source: Arc<dyn RowSource>,
    state: RwLock<Snapshot>,
}

impl DatasetStore {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            state: RwLock::new(Snapshot::loading()),
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Runs one load cycle. Never fails: fetch errors are logged and leave
    /// an empty store behind.
    pub async fn reload(&self) {
        let start = Instant::now();
        info!("Loading rows from {}", self.source.describe());

        let (records, outcome) = match self.source.fetch_rows().await {
            Ok(records) => {
                info!("Loaded {} rows", records.len());
                (records, "success")
            }
            Err(e) => {
                error!("Failed to load rows, falling back to an empty dataset: {:?}", e);
                (Vec::new(), "failure")
            }
        };

        metrics::counter!(DATASET_LOADS, "outcome" => outcome).increment(1);
        metrics::gauge!(DATASET_RECORDS).set(records.len() as f64);
        metrics::histogram!(DATASET_LOAD_DURATION).record(start.elapsed().as_secs_f64());

        let mut state = self.state.write().await;
        *state = Snapshot {
            loading: false,
            records: Arc::new(RecordStore::new(records)),
            loaded_at: Some(Utc::now()),
        };
    }

    /// Loads once immediately, then again every `interval` if one is given.
    pub fn spawn_refresh_loop(self: Arc<Self>, interval: Option<Duration>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.reload().await;
            let Some(interval) = interval else {
                return;
            };
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately and we just loaded
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.reload().await;
            }
        })
    }
}
