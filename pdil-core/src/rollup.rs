//! Per-unit completion report over the whole, unfiltered dataset.
//!
//! The report always has one row per catalog unit, in catalog order, even
//! when a unit has no records. Records whose `UNIT` isn't in the catalog
//! are left out of every unit count, so the sum of unit totals can be lower
//! than the dataset size.
//!
//! `sisipan` ("insertions") reconciles the ULP-level record count against
//! the unit-level count: `sisipan = records_in_ulp - unit.total`. It is
//! only meaningful when each ULP belongs to a single catalog unit. When
//! several units share a ULP, each of them is compared against the whole
//! ULP count. This arithmetic is kept as-is on purpose.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::UnitCatalog;
use crate::normalize::{MeterKind, ReadStatus};
use crate::record::{fields, Record};

pub const TOTAL_LABEL: &str = "Jumlah Total";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupRow {
    pub unit: String,
    pub ulp: String,
    pub total: u64,
    pub sudah: u64,
    pub belum: u64,
    pub lpb: u64,
    pub pasca: u64,
    pub sisipan: i64,
    pub totalsudahdibaca: i64,
    pub persentase: String,
}

/// The closing row: column sums of every unit row, with an empty `unit`
/// and [`TOTAL_LABEL`] in `ulp`.
pub type TotalRow = RollupRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupReport {
    pub rows: Vec<RollupRow>,
    pub total: TotalRow,
}

/// `sudah / total` as a percentage with two decimals.
pub fn completion_percentage(sudah: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", sudah as f64 / total as f64 * 100.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct UnitTally {
    total: u64,
    sudah: u64,
    belum: u64,
    lpb: u64,
    pasca: u64,
}

impl UnitTally {
    fn observe(self, record: &Record) -> Self {
        let (sudah, belum) = match ReadStatus::of(record) {
            ReadStatus::Read => (1, 0),
            ReadStatus::NotRead => (0, 1),
        };
        let (lpb, pasca) = match MeterKind::of(record) {
            Some(MeterKind::Lpb) => (1, 0),
            Some(MeterKind::Pasca) => (0, 1),
            None => (0, 0),
        };
        Self {
            total: self.total + 1,
            sudah: self.sudah + sudah,
            belum: self.belum + belum,
            lpb: self.lpb + lpb,
            pasca: self.pasca + pasca,
        }
    }
}

/// Counters for one pass over the dataset, keyed by catalog unit and ULP.
/// Both maps are seeded from the catalog and never grow beyond it.
#[derive(Debug, Clone, Default)]
struct Tally<'c> {
    units: HashMap<&'c str, UnitTally>,
    areas: HashMap<&'c str, u64>,
}

impl<'c> Tally<'c> {
    fn seeded(catalog: &'c UnitCatalog) -> Self {
        Self {
            units: catalog
                .entries()
                .iter()
                .map(|e| (e.unit.as_str(), UnitTally::default()))
                .collect(),
            areas: catalog.areas().into_iter().map(|ulp| (ulp, 0)).collect(),
        }
    }

    fn observe(mut self, record: &Record) -> Self {
        if let Some(count) = record.get(fields::ULP).and_then(|ulp| self.areas.get_mut(ulp)) {
            *count += 1;
        }
        if let Some(tally) = record.get(fields::UNIT).and_then(|unit| self.units.get_mut(unit)) {
            *tally = tally.observe(record);
        }
        self
    }
}

fn as_signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Builds the per-unit report. Ignores any listing filter by construction:
/// it only ever sees the full record slice.
pub fn aggregate(records: &[Record], catalog: &UnitCatalog) -> RollupReport {
    let tally = records
        .iter()
        .fold(Tally::seeded(catalog), |tally, record| tally.observe(record));

    let rows: Vec<RollupRow> = catalog
        .entries()
        .iter()
        .map(|entry| {
            let unit = tally
                .units
                .get(entry.unit.as_str())
                .copied()
                .unwrap_or_default();
            let area_count = tally
                .areas
                .get(entry.ulp.as_str())
                .copied()
                .unwrap_or_default();
            let sisipan = as_signed(area_count) - as_signed(unit.total);
            RollupRow {
                unit: entry.unit.clone(),
                ulp: entry.ulp.clone(),
                total: unit.total,
                sudah: unit.sudah,
                belum: unit.belum,
                lpb: unit.lpb,
                pasca: unit.pasca,
                sisipan,
                totalsudahdibaca: as_signed(unit.sudah) + sisipan,
                persentase: completion_percentage(unit.sudah, unit.total),
            }
        })
        .collect();

    let total = TotalRow::sum(&rows);
    RollupReport { rows, total }
}

impl RollupRow {
    /// Builds the [`TotalRow`] for `rows`.
    pub fn sum(rows: &[RollupRow]) -> Self {
        let mut total = Self {
            unit: String::new(),
            ulp: TOTAL_LABEL.to_string(),
            total: 0,
            sudah: 0,
            belum: 0,
            lpb: 0,
            pasca: 0,
            sisipan: 0,
            totalsudahdibaca: 0,
            persentase: String::new(),
        };
        for row in rows {
            total.total += row.total;
            total.sudah += row.sudah;
            total.belum += row.belum;
            total.lpb += row.lpb;
            total.pasca += row.pasca;
            total.sisipan += row.sisipan;
            total.totalsudahdibaca += row.totalsudahdibaca;
        }
        total.persentase = completion_percentage(total.sudah, total.total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitCatalogEntry;

    fn record(unit: Option<&str>, ulp: &str, ket: Option<&str>, kind: Option<&str>) -> Record {
        let mut record = Record::new().with(fields::ULP, ulp);
        if let Some(unit) = unit {
            record = record.with(fields::UNIT, unit);
        }
        if let Some(ket) = ket {
            record = record.with(fields::KET_PDIL, ket);
        }
        if let Some(kind) = kind {
            record = record.with(fields::JENIS_KWH, kind);
        }
        record
    }

    fn row<'a>(report: &'a RollupReport, unit: &str) -> &'a RollupRow {
        report.rows.iter().find(|r| r.unit == unit).unwrap()
    }

    #[test]
    fn test_cipayung_insertion_scenario() {
        let catalog = UnitCatalog::new(vec![UnitCatalogEntry::new("53811", "Cipayung")]).unwrap();
        let records = vec![
            record(Some("53811"), "Cipayung", Some("Sudah Dibaca"), None),
            record(Some("53811"), "Cipayung", Some("Belum"), None),
            record(None, "Cipayung", None, None),
        ];

        let report = aggregate(&records, &catalog);
        let cipayung = row(&report, "53811");
        assert_eq!(cipayung.total, 2);
        assert_eq!(cipayung.sudah, 1);
        assert_eq!(cipayung.belum, 1);
        assert_eq!(cipayung.sisipan, 1);
        assert_eq!(cipayung.totalsudahdibaca, 2);
        assert_eq!(cipayung.persentase, "50.00%");
    }

    #[test]
    fn test_empty_store_reports_every_unit_with_zeros() {
        let catalog = UnitCatalog::default();
        let report = aggregate(&[], &catalog);

        assert_eq!(report.rows.len(), catalog.entries().len());
        for (row, entry) in report.rows.iter().zip(catalog.entries()) {
            assert_eq!(row.unit, entry.unit);
            assert_eq!(row.ulp, entry.ulp);
            assert_eq!(
                (row.total, row.sudah, row.belum, row.lpb, row.pasca),
                (0, 0, 0, 0, 0)
            );
            assert_eq!((row.sisipan, row.totalsudahdibaca), (0, 0));
            assert_eq!(row.persentase, "0.00%");
        }
        assert_eq!(report.total.ulp, TOTAL_LABEL);
        assert_eq!(report.total.unit, "");
        assert_eq!(report.total.total, 0);
        assert_eq!(report.total.sisipan, 0);
        assert_eq!(report.total.persentase, "0.00%");
    }

    #[test]
    fn test_meter_kinds_and_status_counts() {
        let catalog = UnitCatalog::default();
        let records = vec![
            record(Some("53851"), "Leuwiliang", Some("sudah dibaca "), Some("LPB")),
            record(Some("53851"), "Leuwiliang", Some("Sudah Dibaca"), Some(" pasca")),
            record(Some("53851"), "Leuwiliang", None, Some("PRA")),
            record(Some("53851"), "Leuwiliang", Some("Rumah Kosong"), Some("LPB")),
        ];
        let report = aggregate(&records, &catalog);
        let leuwiliang = row(&report, "53851");
        assert_eq!(leuwiliang.total, 4);
        assert_eq!(leuwiliang.sudah, 2);
        assert_eq!(leuwiliang.belum, 2);
        assert_eq!(leuwiliang.lpb, 2);
        assert_eq!(leuwiliang.pasca, 1);
        assert_eq!(leuwiliang.sudah + leuwiliang.belum, leuwiliang.total);
        assert_eq!(leuwiliang.sisipan, 0);
    }

    #[test]
    fn test_unknown_unit_and_area_are_excluded() {
        let catalog = UnitCatalog::default();
        let records = vec![
            record(Some("99999"), "Cipayung", Some("Sudah Dibaca"), None),
            record(Some("53811"), "Depok", Some("Sudah Dibaca"), None),
            record(Some("99999"), "Depok", None, None),
        ];
        let report = aggregate(&records, &catalog);
        let cipayung = row(&report, "53811");

        // the unknown unit still feeds its ULP counter
        assert_eq!(cipayung.total, 1);
        assert_eq!(cipayung.sisipan, 0);
        assert_eq!(report.total.total, 1);
        assert!(report.total.total < records.len() as u64);
    }

    #[test]
    fn test_negative_insertions_are_kept() {
        let catalog = UnitCatalog::default();
        // unit matches but ULP is misspelled, so the area counter stays at 0
        let records = vec![
            record(Some("53821"), "Bogor  Timur", Some("Sudah Dibaca"), None),
            record(Some("53821"), "Bogor  Timur", Some("Sudah Dibaca"), None),
        ];
        let report = aggregate(&records, &catalog);
        let timur = row(&report, "53821");
        assert_eq!(timur.sisipan, -2);
        assert_eq!(timur.totalsudahdibaca, 0);
    }

    #[test]
    fn test_shared_area_compares_whole_area_per_unit() {
        let catalog: UnitCatalog = "1=Shared,2=Shared".parse().unwrap();
        let records = vec![
            record(Some("1"), "Shared", None, None),
            record(Some("2"), "Shared", None, None),
            record(Some("2"), "Shared", None, None),
        ];
        let report = aggregate(&records, &catalog);
        assert_eq!(row(&report, "1").sisipan, 2);
        assert_eq!(row(&report, "2").sisipan, 1);
    }

    #[test]
    fn test_total_row_is_column_sum() {
        let catalog = UnitCatalog::default();
        let records = vec![
            record(Some("53811"), "Cipayung", Some("Sudah Dibaca"), Some("LPB")),
            record(Some("53831"), "Bogor Kota", Some("Belum"), Some("PASCA")),
            record(None, "Bogor Kota", None, None),
            record(Some("53853"), "Jasinga", Some("Sudah Dibaca"), Some("PASCA")),
        ];
        let report = aggregate(&records, &catalog);
        let rows = &report.rows;

        assert_eq!(report.total.total, rows.iter().map(|r| r.total).sum::<u64>());
        assert_eq!(report.total.sudah, rows.iter().map(|r| r.sudah).sum::<u64>());
        assert_eq!(report.total.belum, rows.iter().map(|r| r.belum).sum::<u64>());
        assert_eq!(report.total.lpb, rows.iter().map(|r| r.lpb).sum::<u64>());
        assert_eq!(report.total.pasca, rows.iter().map(|r| r.pasca).sum::<u64>());
        assert_eq!(report.total.sisipan, rows.iter().map(|r| r.sisipan).sum::<i64>());
        assert_eq!(
            report.total.totalsudahdibaca,
            rows.iter().map(|r| r.totalsudahdibaca).sum::<i64>()
        );
        assert_eq!(report.total.sisipan, 1);
        assert_eq!(report.total.persentase, "66.67%");
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let catalog = UnitCatalog::default();
        let records = vec![record(Some("53841"), "Bogor Barat", Some("Sudah Dibaca"), None)];
        assert_eq!(aggregate(&records, &catalog), aggregate(&records, &catalog));
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), "0.00%");
        assert_eq!(completion_percentage(1, 3), "33.33%");
        assert_eq!(completion_percentage(3, 3), "100.00%");
    }
}
