use serde::{Deserialize, Serialize};
use url::Url;

/// Untyped value read from a card: text content or an attribute.
pub type RawFieldValue = Option<String>;

/// One normalized listing. Only built through [`CarListing::new`], which
/// refuses records without a usable image and detail link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarListing {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage_km: Option<u64>,
    pub price_krw: Option<u64>,
    pub image: String,
    pub link: String,
}

/// Best-effort fields collected from one card before the viability gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub mileage_km: Option<u64>,
    pub price_krw: Option<u64>,
}

impl CarListing {
    pub fn new(fields: ListingFields, image: &str, link: &str) -> Option<Self> {
        if !is_viable_url(image) || !is_viable_url(link) {
            return None;
        }
        Some(Self {
            brand: fields.brand,
            model: fields.model,
            year: fields.year,
            mileage_km: fields.mileage_km,
            price_krw: fields.price_krw,
            image: image.to_string(),
            link: link.to_string(),
        })
    }

    pub fn is_viable(&self) -> bool {
        is_viable_url(&self.image) && is_viable_url(&self.link)
    }
}

/// Non-empty and absolute.
pub fn is_viable_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && Url::parse(candidate).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub updated_at: i64,
    pub cars: Vec<CarListing>,
}

/// What one listing page produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHarvest {
    pub url: String,
    pub cars: Vec<CarListing>,
    pub stats: HarvestStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestStats {
    pub cards_found: usize,
    pub cards_considered: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub faulted: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub snapshot: Snapshot,
    pub csv_output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub cars_saved: usize,
    pub pages_harvested: usize,
}
