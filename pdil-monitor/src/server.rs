use std::{future::Future, sync::Arc};

use anyhow::Context;
use pdil_core::Paginator;
use tokio::net::TcpListener;

use crate::{
    app::{create_router, AppState},
    config::Config,
    dataset::DatasetStore,
    export::{CsvTabularWriter, ZipArchiveBuilder, ARCHIVE_FOLDER},
    photos, source,
};

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let catalog = config.catalog().context("Invalid UNIT_CATALOG")?;
    let rows = source::from_config(config).context("Failed to create row source")?;
    let photos = photos::from_config(config).context("Failed to create photo fetcher")?;

    Ok(AppState {
        dataset: Arc::new(DatasetStore::new(rows)),
        photos,
        writer: Arc::new(CsvTabularWriter),
        archive: Arc::new(ZipArchiveBuilder::new(ARCHIVE_FOLDER)),
        catalog: Arc::new(catalog),
        paginator: Paginator::new(config.page_size),
        photo_fetch_concurrency: config.photo_fetch_concurrency(),
    })
}

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&config)?;

    let refresh = state
        .dataset
        .clone()
        .spawn_refresh_loop(config.refresh_interval());

    tracing::info!("listening on {:?}", listener.local_addr()?);
    let app = create_router(state, config.enable_metrics);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    refresh.abort();
    served.context("Server exited with an error")
}
