use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column names shared with the upstream sheet. These are matched exactly,
/// spaces and case included.
pub mod fields {
    pub const UNIT: &str = "UNIT";
    pub const HEADER: &str = "HEADER";
    pub const ULP: &str = "ULP";
    pub const ID_PELANGGAN: &str = "ID PELANGGAN";
    pub const NAMA: &str = "NAMA";
    pub const ALAMAT: &str = "ALAMAT";
    pub const TARIF_DAYA: &str = "TARIF DAYA";
    pub const NO_METER: &str = "NO METER";
    pub const GARDU_TIANG: &str = "GARDU TIANG";
    pub const RBM: &str = "RBM";
    pub const PBM: &str = "PBM";
    pub const PETUGAS: &str = "PETUGAS";
    pub const JENIS_KWH: &str = "JENIS KWH";
    pub const TGL_PDIL: &str = "TGL PDIL";
    pub const KET_PDIL: &str = "KET PDIL";
    pub const LOKASI: &str = "LOKASI";
    pub const KORDINAT: &str = "KORDINAT";
    pub const FILE_FOTO: &str = "FILE FOTO";
}

/// One customer/meter row, keyed by column name.
///
/// Values are kept exactly as the source delivered them. A column that the
/// source row did not carry is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for assembling rows in tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The full set of rows from one fetch cycle. Replaced wholesale on every
/// fetch, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
