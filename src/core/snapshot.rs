use crate::domain::model::{CarListing, Snapshot};
use crate::utils::error::Result;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotAssembler {
    dedupe_by_link: bool,
}

impl SnapshotAssembler {
    pub fn new(dedupe_by_link: bool) -> Self {
        Self { dedupe_by_link }
    }

    /// Concatenates page results in visitation order and stamps them.
    ///
    /// Listings failing the viability gate are dropped again here; with
    /// `dedupe_by_link` only the first listing per detail link is kept.
    pub fn assemble<I>(&self, pages: I, updated_at: i64) -> Snapshot
    where
        I: IntoIterator<Item = Vec<CarListing>>,
    {
        let mut seen = HashSet::new();
        let cars = pages
            .into_iter()
            .flatten()
            .filter(CarListing::is_viable)
            .filter(|car| !self.dedupe_by_link || seen.insert(car.link.clone()))
            .collect();

        Snapshot { updated_at, cars }
    }

    pub fn assemble_now<I>(&self, pages: I) -> Snapshot
    where
        I: IntoIterator<Item = Vec<CarListing>>,
    {
        self.assemble(pages, chrono::Utc::now().timestamp())
    }
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Column order of the CSV export; matches the `CarListing` field names.
pub const CSV_COLUMNS: [&str; 7] = [
    "brand",
    "model",
    "year",
    "mileage_km",
    "price_krw",
    "image",
    "link",
];

/// One row per car, same columns as the JSON records. The header row is
/// written even when there are no cars.
pub fn snapshot_to_csv(snapshot: &Snapshot) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_COLUMNS)?;
    for car in &snapshot.cars {
        writer.serialize(car)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(csv)
}
