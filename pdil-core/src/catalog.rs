use std::{collections::HashSet, fmt, str::FromStr};

use serde::Serialize;

use crate::error::CatalogError;

/// The units reported on by default, in report order.
pub const DEFAULT_CATALOG: &[(&str, &str)] = &[
    ("53811", "Cipayung"),
    ("53821", "Bogor Timur"),
    ("53831", "Bogor Kota"),
    ("53841", "Bogor Barat"),
    ("53851", "Leuwiliang"),
    ("53853", "Jasinga"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitCatalogEntry {
    pub unit: String,
    pub ulp: String,
}

impl UnitCatalogEntry {
    pub fn new(unit: impl Into<String>, ulp: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            ulp: ulp.into(),
        }
    }
}

/// Authoritative, ordered list of units the rollup reports on.
///
/// Units are unique. Several units may share one ULP, though the insertion
/// delta in the rollup assumes they don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCatalog {
    entries: Vec<UnitCatalogEntry>,
}

impl UnitCatalog {
    pub fn new(entries: Vec<UnitCatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.unit.as_str()) {
                return Err(CatalogError::DuplicateUnit(entry.unit.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[UnitCatalogEntry] {
        &self.entries
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.entries.iter().any(|e| e.unit == unit)
    }

    pub fn contains_ulp(&self, ulp: &str) -> bool {
        self.entries.iter().any(|e| e.ulp == ulp)
    }

    /// Distinct ULP names, in the order they first appear.
    pub fn areas(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.ulp.as_str())
            .filter(|ulp| seen.insert(*ulp))
            .collect()
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CATALOG
                .iter()
                .map(|(unit, ulp)| UnitCatalogEntry::new(*unit, *ulp))
                .collect(),
        }
    }
}

/// Parses `unit=ULP` pairs separated by commas, e.g.
/// `53811=Cipayung,53821=Bogor Timur`.
impl FromStr for UnitCatalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (unit, ulp) = part
                    .split_once('=')
                    .ok_or_else(|| CatalogError::MalformedEntry(part.to_string()))?;
                let (unit, ulp) = (unit.trim(), ulp.trim());
                if unit.is_empty() || ulp.is_empty() {
                    return Err(CatalogError::BlankField(part.to_string()));
                }
                Ok(UnitCatalogEntry::new(unit, ulp))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries)
    }
}

impl fmt::Display for UnitCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}={}", e.unit, e.ulp))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
