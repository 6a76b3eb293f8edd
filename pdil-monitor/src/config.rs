use std::{net::SocketAddr, str::FromStr, time::Duration};

use envconfig::Envconfig;
use pdil_core::{CatalogError, UnitCatalog, DEFAULT_PAGE_SIZE};

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTfELCjsjIkZhKELOGBb_yybu6oZOvN468uKYwKahgCyAtoJoUJyfZ0iBMWVQ4xOydbd1im79D-i6h3/pub?gid=1408204138&single=true&output=csv";

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(default = "127.0.0.1:3302")]
    pub address: SocketAddr,

    #[envconfig(
        from = "SHEET_URL",
        default = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTfELCjsjIkZhKELOGBb_yybu6oZOvN468uKYwKahgCyAtoJoUJyfZ0iBMWVQ4xOydbd1im79D-i6h3/pub?gid=1408204138&single=true&output=csv"
    )]
    pub sheet_url: String,

    // Takes precedence over SHEET_URL when set
    #[envconfig(from = "ROWS_FILE")]
    pub rows_file: Option<String>,

    // Takes precedence over PHOTO_DIR when set
    #[envconfig(from = "PHOTO_BASE_URL")]
    pub photo_base_url: Option<String>,

    #[envconfig(from = "PHOTO_DIR", default = "images")]
    pub photo_dir: String,

    #[envconfig(from = "PAGE_SIZE", default = "50")]
    pub page_size: usize,

    #[envconfig(from = "FETCH_TIMEOUT_SECS", default = "30")]
    pub fetch_timeout_secs: u64,

    // 0 loads the sheet once at startup
    #[envconfig(from = "REFRESH_INTERVAL_SECS", default = "0")]
    pub refresh_interval_secs: u64,

    #[envconfig(from = "PHOTO_FETCH_CONCURRENCY", default = "8")]
    pub photo_fetch_concurrency: usize,

    #[envconfig(
        from = "UNIT_CATALOG",
        default = "53811=Cipayung,53821=Bogor Timur,53831=Bogor Kota,53841=Bogor Barat,53851=Leuwiliang,53853=Jasinga"
    )]
    pub unit_catalog: String,

    #[envconfig(from = "ENABLE_METRICS", default = "false")]
    pub enable_metrics: bool,
}

impl Config {
    pub fn default_for_test() -> Self {
        Config {
            address: SocketAddr::from_str("127.0.0.1:0").unwrap(),
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            rows_file: None,
            photo_base_url: None,
            photo_dir: "images".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_timeout_secs: 5,
            refresh_interval_secs: 0,
            photo_fetch_concurrency: 4,
            unit_catalog: UnitCatalog::default().to_string(),
            enable_metrics: false,
        }
    }

    pub fn catalog(&self) -> Result<UnitCatalog, CatalogError> {
        self.unit_catalog.parse()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.refresh_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn photo_fetch_concurrency(&self) -> usize {
        self.photo_fetch_concurrency.max(1)
    }
}
