use std::collections::HashSet;

use serde::Serialize;

use crate::record::{fields, Record};

/// Fields the free-text search looks into.
pub const SEARCH_FIELDS: [&str; 6] = [
    fields::ID_PELANGGAN,
    fields::NO_METER,
    fields::NAMA,
    fields::ALAMAT,
    fields::GARDU_TIANG,
    fields::RBM,
];

/// The active listing constraints. Every constraint is optional, an empty
/// string counts as unset, and all of them are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: Option<String>,
    pub ulp: Option<String>,
    pub pbm: Option<String>,
    pub petugas: Option<String>,
    pub jenis_kwh: Option<String>,
    pub ket_pdil: Option<String>,
}

fn active(constraint: &Option<String>) -> Option<&str> {
    constraint.as_deref().filter(|value| !value.is_empty())
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_ulp(mut self, ulp: impl Into<String>) -> Self {
        self.ulp = Some(ulp.into());
        self
    }

    pub fn with_pbm(mut self, pbm: impl Into<String>) -> Self {
        self.pbm = Some(pbm.into());
        self
    }

    pub fn with_petugas(mut self, petugas: impl Into<String>) -> Self {
        self.petugas = Some(petugas.into());
        self
    }

    pub fn with_jenis_kwh(mut self, jenis_kwh: impl Into<String>) -> Self {
        self.jenis_kwh = Some(jenis_kwh.into());
        self
    }

    pub fn with_ket_pdil(mut self, ket_pdil: impl Into<String>) -> Self {
        self.ket_pdil = Some(ket_pdil.into());
        self
    }

    pub fn is_unset(&self) -> bool {
        self.equality_constraints()
            .iter()
            .all(|(_, value)| value.is_none())
            && active(&self.search).is_none()
    }

    fn equality_constraints(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (fields::ULP, active(&self.ulp)),
            (fields::PBM, active(&self.pbm)),
            (fields::PETUGAS, active(&self.petugas)),
            (fields::JENIS_KWH, active(&self.jenis_kwh)),
            (fields::KET_PDIL, active(&self.ket_pdil)),
        ]
    }

    fn matches_search(&self, record: &Record) -> bool {
        let Some(term) = active(&self.search) else {
            return true;
        };
        let term = term.to_lowercase();
        SEARCH_FIELDS.iter().any(|field| {
            record
                .get(field)
                .is_some_and(|value| value.to_lowercase().contains(&term))
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self
                .equality_constraints()
                .iter()
                .all(|(field, wanted)| match wanted {
                    None => true,
                    Some(wanted) => record.get(field) == Some(*wanted),
                })
    }

    /// Stable filter: the result keeps the input's relative order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct values offered for each equality constraint, in the order they
/// first appear in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub ulp: Vec<String>,
    pub pbm: Vec<String>,
    pub petugas: Vec<String>,
    pub jenis_kwh: Vec<String>,
    pub ket_pdil: Vec<String>,
}

fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.get(field))
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

impl FilterOptions {
    pub fn collect(records: &[Record]) -> Self {
        Self {
            ulp: distinct_values(records, fields::ULP),
            pbm: distinct_values(records, fields::PBM),
            petugas: distinct_values(records, fields::PETUGAS),
            jenis_kwh: distinct_values(records, fields::JENIS_KWH),
            ket_pdil: distinct_values(records, fields::KET_PDIL),
        }
    }
}
