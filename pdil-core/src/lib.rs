//! Filtering and rollup pipeline for PDIL meter-reading datasets.
//!
//! Everything in this crate is a pure function of its inputs: a loaded
//! [`RecordStore`], a [`FilterState`], a page number and a [`UnitCatalog`].
//! Fetching rows, encoding exports and packaging photos live in the
//! `pdil-monitor` service.

pub mod catalog;
pub mod error;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod record;
pub mod rollup;
pub mod status;

pub use catalog::{UnitCatalog, UnitCatalogEntry};
pub use error::CatalogError;
pub use export::{reshape, ExportRow, EXPORT_COLUMNS};
pub use filter::{FilterOptions, FilterState};
pub use normalize::{MeterKind, ReadStatus};
pub use paginate::{Page, Paginator, DEFAULT_PAGE_SIZE};
pub use record::{Record, RecordStore};
pub use rollup::{aggregate, RollupReport, RollupRow, TotalRow};
pub use status::StatusCounts;
