use serde::Serialize;

use crate::normalize::ReadStatus;
use crate::record::Record;

/// Read / not-read split of a filtered listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub sudah: usize,
    pub belum: usize,
}

impl StatusCounts {
    pub fn count(records: &[&Record]) -> Self {
        records
            .iter()
            .fold(Self::default(), |acc, record| match ReadStatus::of(record) {
                ReadStatus::Read => Self {
                    sudah: acc.sudah + 1,
                    ..acc
                },
                ReadStatus::NotRead => Self {
                    belum: acc.belum + 1,
                    ..acc
                },
            })
    }

    pub fn total(&self) -> usize {
        self.sudah + self.belum
    }
}
