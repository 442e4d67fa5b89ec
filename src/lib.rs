pub mod adapters;
pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod extract;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FilePageSource, HttpPageSource};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    card::CardNormalizer, etl::HarvestEngine, harvester::ListingHarvester,
    pipeline::HarvestPipeline, snapshot::SnapshotAssembler,
};
pub use domain::model::{CarListing, Snapshot};
pub use utils::error::{HarvestError, Result};
