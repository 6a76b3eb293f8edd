use anyhow::Context;
use envconfig::Envconfig;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use pdil_monitor::{config::Config, server::serve};

fn setup_tracing() {
    let log_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(log_layer).init();
}

async fn shutdown() {
    let term = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = term => {},
        _ = signal::ctrl_c() => {},
    };

    info!("Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    info!("Starting up...");

    let config = Config::init_from_env().context("Invalid configuration")?;

    let listener = tokio::net::TcpListener::bind(config.address)
        .await
        .with_context(|| format!("Could not bind {}", config.address))?;

    serve(config, listener, shutdown()).await?;

    info!("Shut down");
    Ok(())
}
