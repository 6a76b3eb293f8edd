mod laporan;
mod monitoring;
mod photos;

pub use laporan::{get_laporan, LaporanResponse};
pub use monitoring::{
    get_monitoring, get_monitoring_export, get_monitoring_photos, ListedRow, MonitoringQuery,
    MonitoringResponse,
};
pub use photos::get_photo;
