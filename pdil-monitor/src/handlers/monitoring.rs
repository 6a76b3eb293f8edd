use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use pdil_core::{reshape, FilterOptions, FilterState, Record, StatusCounts};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::AppState;
use crate::error::Result;
use crate::export::{Blob, ARCHIVE_FILENAME, EXPORT_FILENAME};
use crate::metrics_consts::EXPORTS;
use crate::photos::{fetch_all, photo_names};

#[derive(Debug, Default, Deserialize)]
pub struct MonitoringQuery {
    pub q: Option<String>,
    pub ulp: Option<String>,
    pub pbm: Option<String>,
    pub petugas: Option<String>,
    pub jenis_kwh: Option<String>,
    pub ket_pdil: Option<String>,
    pub page: Option<String>,
}

impl MonitoringQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.q.clone(),
            ulp: self.ulp.clone(),
            pbm: self.pbm.clone(),
            petugas: self.petugas.clone(),
            jenis_kwh: self.jenis_kwh.clone(),
            ket_pdil: self.ket_pdil.clone(),
        }
    }

    /// Anything that isn't a positive page number reads as page 1.
    pub fn requested_page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
pub struct ListedRow<'a> {
    pub no: usize,
    pub record: &'a Record,
}

#[derive(Debug, Serialize)]
pub struct MonitoringResponse<'a> {
    pub loading: bool,
    pub loaded_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub sudah_dibaca: usize,
    pub belum_dibaca: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub rows: Vec<ListedRow<'a>>,
    pub options: FilterOptions,
}

pub async fn get_monitoring(
    State(state): State<AppState>,
    Query(query): Query<MonitoringQuery>,
) -> Response {
    let snapshot = state.dataset.snapshot().await;
    let records = snapshot.records.records();

    let filter = query.filter_state();
    let filtered = filter.apply(records);
    let counts = StatusCounts::count(&filtered);
    let page = state.paginator.page(&filtered, query.requested_page());
    let next_page = state.paginator.next(page.number, filtered.len());
    let prev_page = state.paginator.prev(page.number, filtered.len());

    debug!(
        filter = ?filter,
        page = page.number,
        matched = filtered.len(),
        "Listing records"
    );

    let response = MonitoringResponse {
        loading: snapshot.loading,
        loaded_at: snapshot.loaded_at,
        total: filtered.len(),
        sudah_dibaca: counts.sudah,
        belum_dibaca: counts.belum,
        page: page.number,
        page_size: state.paginator.page_size(),
        total_pages: state.paginator.total_pages(filtered.len()),
        next_page: (next_page > page.number).then_some(next_page),
        prev_page: (prev_page < page.number).then_some(prev_page),
        rows: page
            .numbered()
            .map(|(no, record)| ListedRow {
                no,
                record: *record,
            })
            .collect(),
        options: FilterOptions::collect(records),
    };

    Json(response).into_response()
}

pub async fn get_monitoring_export(
    State(state): State<AppState>,
    Query(query): Query<MonitoringQuery>,
) -> Result<Blob> {
    let snapshot = state.dataset.snapshot().await;
    let filtered = query.filter_state().apply(snapshot.records.records());

    let rows = reshape(&filtered);
    let blob = state.writer.write(&rows, EXPORT_FILENAME)?;

    metrics::counter!(EXPORTS, "kind" => "table").increment(1);
    info!("Exported {} rows to {}", rows.len(), blob.filename);
    Ok(blob)
}

pub async fn get_monitoring_photos(
    State(state): State<AppState>,
    Query(query): Query<MonitoringQuery>,
) -> Result<Blob> {
    let names = {
        let snapshot = state.dataset.snapshot().await;
        let filtered = query.filter_state().apply(snapshot.records.records());
        photo_names(&filtered)
    };

    let requested = names.len();
    let entries = fetch_all(
        state.photos.as_ref(),
        names,
        state.photo_fetch_concurrency,
    )
    .await;
    let blob = state.archive.create(&entries, ARCHIVE_FILENAME)?;

    metrics::counter!(EXPORTS, "kind" => "photos").increment(1);
    info!(
        "Archived {} of {} photos into {}",
        entries.len(),
        requested,
        blob.filename
    );
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> MonitoringQuery {
        MonitoringQuery {
            page: page.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_requested_page_falls_back_to_first() {
        assert_eq!(query(None).requested_page(), 1);
        assert_eq!(query(Some("3")).requested_page(), 3);
        assert_eq!(query(Some("abc")).requested_page(), 1);
        assert_eq!(query(Some("-2")).requested_page(), 1);
        assert_eq!(query(Some("")).requested_page(), 1);
    }
}
