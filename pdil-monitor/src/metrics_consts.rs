pub const DATASET_LOADS: &str = "pdil_dataset_loads_total";
pub const DATASET_RECORDS: &str = "pdil_dataset_records";
pub const DATASET_LOAD_DURATION: &str = "pdil_dataset_load_duration_seconds";
pub const PHOTO_FETCH_MISSING: &str = "pdil_photo_fetch_missing_total";
pub const PHOTO_FETCH_FAILURES: &str = "pdil_photo_fetch_failures_total";
pub const EXPORTS: &str = "pdil_exports_total";
