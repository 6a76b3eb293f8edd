use std::{future::ready, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Router};
use pdil_core::{Paginator, UnitCatalog};
use tower_http::trace::TraceLayer;

use crate::dataset::DatasetStore;
use crate::export::{ArchiveBuilder, TabularWriter};
use crate::handlers::{
    get_laporan, get_monitoring, get_monitoring_export, get_monitoring_photos, get_photo,
};
use crate::metrics::{setup_metrics_recorder, track_metrics};
use crate::photos::PhotoFetcher;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<DatasetStore>,
    pub photos: Arc<dyn PhotoFetcher>,
    pub writer: Arc<dyn TabularWriter>,
    pub archive: Arc<dyn ArchiveBuilder>,
    pub catalog: Arc<UnitCatalog>,
    pub paginator: Paginator,
    pub photo_fetch_concurrency: usize,
}

pub fn create_router(state: AppState, enable_metrics: bool) -> Router {
    let api_routes = Router::new()
        .route("/api/monitoring", get(get_monitoring))
        .route("/api/monitoring/export", get(get_monitoring_export))
        .route("/api/monitoring/photos", get(get_monitoring_photos))
        .route("/api/photos/:filename", get(get_photo))
        .route("/api/laporan", get(get_laporan));

    let health_routes = Router::new()
        .route("/", get(index))
        .route("/_liveness", get(liveness))
        .route("/_readiness", get(readiness));

    let router = Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if !enable_metrics {
        return router;
    }

    match setup_metrics_recorder() {
        Ok(recorder_handle) => router
            .route("/metrics", get(move || ready(recorder_handle.render())))
            .layer(axum::middleware::from_fn(track_metrics)),
        Err(e) => {
            tracing::error!("Failed to install metrics recorder, serving without /metrics: {}", e);
            router
        }
    }
}

async fn index() -> &'static str {
    "pdil monitor"
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    if state.dataset.is_loading().await {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok("ok")
}
