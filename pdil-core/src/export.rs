use serde::Serialize;

use crate::record::{fields, Record};

/// Synthesized 1-based row index column.
pub const ROW_INDEX_COLUMN: &str = "NO";

/// Source columns copied into an export, in output order.
pub const SOURCE_COLUMNS: [&str; 18] = [
    fields::UNIT,
    fields::HEADER,
    fields::ULP,
    fields::ID_PELANGGAN,
    fields::NAMA,
    fields::ALAMAT,
    fields::TARIF_DAYA,
    fields::NO_METER,
    fields::GARDU_TIANG,
    fields::RBM,
    fields::PBM,
    fields::PETUGAS,
    fields::JENIS_KWH,
    fields::TGL_PDIL,
    fields::KET_PDIL,
    fields::LOKASI,
    fields::KORDINAT,
    fields::FILE_FOTO,
];

/// Full export header: the row index followed by every source column.
pub const EXPORT_COLUMNS: [&str; SOURCE_COLUMNS.len() + 1] = export_columns();

const fn export_columns() -> [&'static str; SOURCE_COLUMNS.len() + 1] {
    let mut columns = [ROW_INDEX_COLUMN; SOURCE_COLUMNS.len() + 1];
    let mut i = 0;
    while i < SOURCE_COLUMNS.len() {
        columns[i + 1] = SOURCE_COLUMNS[i];
        i += 1;
    }
    columns
}

/// A flat export row. Every column is always present; absent source values
/// stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub no: usize,
    pub values: [Option<String>; 18],
}

impl ExportRow {
    fn from_record(no: usize, record: &Record) -> Self {
        Self {
            no,
            values: SOURCE_COLUMNS.map(|column| record.get(column).map(str::to_string)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        SOURCE_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.values[i].as_deref())
    }

    /// Cells in `EXPORT_COLUMNS` order, absent values rendered empty.
    pub fn cells(&self) -> Vec<String> {
        std::iter::once(self.no.to_string())
            .chain(self.values.iter().map(|v| v.clone().unwrap_or_default()))
            .collect()
    }
}

/// 1:1 reshape of a filtered listing into export rows.
pub fn reshape(records: &[&Record]) -> Vec<ExportRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| ExportRow::from_record(i + 1, record))
        .collect()
}
