use serde::Serialize;

use crate::record::{fields, Record};

/// Normalized `KET PDIL` value meaning the meter has been read.
pub const READ_SENTINEL: &str = "SUDAH DIBACA";
/// Normalized `JENIS KWH` values that the report tracks.
pub const KIND_LPB: &str = "LPB";
pub const KIND_PASCA: &str = "PASCA";

/// The one normalization applied before comparing free text to a sentinel.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

fn normalized_field(record: &Record, field: &str) -> Option<String> {
    record.get(field).map(normalize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Read,
    NotRead,
}

impl ReadStatus {
    /// A missing or unrecognized status is `NotRead`.
    pub fn of(record: &Record) -> Self {
        match normalized_field(record, fields::KET_PDIL) {
            Some(status) if status == READ_SENTINEL => ReadStatus::Read,
            _ => ReadStatus::NotRead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterKind {
    Lpb,
    Pasca,
}

impl MeterKind {
    /// Returns `None` for every kind the report doesn't track.
    pub fn of(record: &Record) -> Option<Self> {
        match normalized_field(record, fields::JENIS_KWH)?.as_str() {
            KIND_LPB => Some(MeterKind::Lpb),
            KIND_PASCA => Some(MeterKind::Pasca),
            _ => None,
        }
    }
}
