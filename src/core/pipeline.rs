use crate::core::card::CardNormalizer;
use crate::core::harvester::ListingHarvester;
use crate::core::snapshot::{snapshot_to_csv, snapshot_to_json, SnapshotAssembler};
use crate::core::{ConfigProvider, PageSource, Pipeline, Storage};
use crate::domain::model::{PageHarvest, TransformResult};
use crate::domain::ports::PageFailurePolicy;
use crate::utils::error::Result;
use std::path::Path;

pub struct HarvestPipeline<S: Storage, P: PageSource, C: ConfigProvider> {
    storage: S,
    source: P,
    config: C,
    harvester: ListingHarvester,
    assembler: SnapshotAssembler,
}

impl<S: Storage, P: PageSource, C: ConfigProvider> HarvestPipeline<S, P, C> {
    pub fn new(storage: S, source: P, config: C) -> Self {
        let normalizer = CardNormalizer::new(config.selectors().clone(), config.site_origin());
        let harvester = ListingHarvester::new(normalizer).with_max_cards(config.max_cards());
        let assembler = SnapshotAssembler::new(config.dedupe_by_link());
        Self {
            storage,
            source,
            config,
            harvester,
            assembler,
        }
    }

    /// Swaps in a custom harvester, e.g. one with different name strategies.
    pub fn with_harvester(mut self, harvester: ListingHarvester) -> Self {
        self.harvester = harvester;
        self
    }

    async fn harvest_page(&self, url: &str) -> Result<PageHarvest> {
        let html = self.source.fetch_page(url).await?;
        self.harvester.harvest_html(url, &html)
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: PageSource, C: ConfigProvider> Pipeline for HarvestPipeline<S, P, C> {
    async fn extract(&self) -> Result<Vec<PageHarvest>> {
        let urls = self.config.page_urls();
        let delay = self.config.page_delay();
        let mut pages = Vec::with_capacity(urls.len());
        let mut last_error = None;

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tracing::debug!("Harvesting page {} of {}: {}", index + 1, urls.len(), url);
            match self.harvest_page(url).await {
                Ok(page) => {
                    tracing::info!(
                        "Page {}: {} cars ({} cards seen)",
                        index + 1,
                        page.cars.len(),
                        page.stats.cards_considered
                    );
                    pages.push(page);
                }
                Err(e) => match self.config.page_failure_policy() {
                    PageFailurePolicy::Abort => return Err(e),
                    PageFailurePolicy::Skip => {
                        tracing::warn!("Skipping page {}: {}", url, e);
                        last_error = Some(e);
                    }
                },
            }
        }

        // Every page failed: surface the error instead of saving an empty snapshot.
        if pages.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        Ok(pages)
    }

    async fn transform(&self, pages: Vec<PageHarvest>) -> Result<TransformResult> {
        let snapshot = self
            .assembler
            .assemble_now(pages.into_iter().map(|page| page.cars));

        let csv_output = if self.config.write_csv() {
            Some(snapshot_to_csv(&snapshot)?)
        } else {
            None
        };

        Ok(TransformResult {
            snapshot,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let filename = self.config.snapshot_filename();
        let json = snapshot_to_json(&result.snapshot)?;

        tracing::debug!("Writing snapshot ({} bytes) to storage", json.len());
        self.storage.write_file(filename, json.as_bytes()).await?;

        if let Some(csv) = &result.csv_output {
            let csv_name = Path::new(filename).with_extension("csv");
            let csv_name = csv_name.to_string_lossy();
            tracing::debug!("Writing CSV export to {}", csv_name);
            self.storage.write_file(&csv_name, csv.as_bytes()).await?;
        }

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}
