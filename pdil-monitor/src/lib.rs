pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod handlers;
pub mod metrics;
pub mod metrics_consts;
pub mod photos;
pub mod server;
pub mod source;

pub use app::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
