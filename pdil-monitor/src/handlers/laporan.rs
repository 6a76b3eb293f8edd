use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use pdil_core::{aggregate, RollupRow, TotalRow};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct LaporanResponse {
    pub loading: bool,
    pub loaded_at: Option<DateTime<Utc>>,
    pub rows: Vec<RollupRow>,
    pub total: Option<TotalRow>,
}

/// The per-unit report always covers the whole dataset; listing filters
/// don't apply here.
pub async fn get_laporan(State(state): State<AppState>) -> Json<LaporanResponse> {
    let snapshot = state.dataset.snapshot().await;

    if snapshot.loading {
        return Json(LaporanResponse {
            loading: true,
            loaded_at: None,
            rows: Vec::new(),
            total: None,
        });
    }

    let report = aggregate(snapshot.records.records(), &state.catalog);
    Json(LaporanResponse {
        loading: false,
        loaded_at: snapshot.loaded_at,
        rows: report.rows,
        total: Some(report.total),
    })
}
