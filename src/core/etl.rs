use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use std::time::Instant;

pub struct HarvestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> HarvestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("Starting harvest run");

        // Extract
        let pages = self.pipeline.extract().await?;
        let pages_harvested = pages.len();
        let cards_seen: usize = pages.iter().map(|p| p.stats.cards_considered).sum();
        tracing::info!(
            "Extracted {} pages ({} cards considered)",
            pages_harvested,
            cards_seen
        );

        // Transform
        let result = self.pipeline.transform(pages).await?;
        let cars_saved = result.snapshot.cars.len();
        tracing::info!("Assembled snapshot with {} cars", cars_saved);

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!(
            "Saved {} cars -> {} in {:?}",
            cars_saved,
            output_path,
            started.elapsed()
        );

        Ok(RunSummary {
            output_path,
            cars_saved,
            pages_harvested,
        })
    }
}
