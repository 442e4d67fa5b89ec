use crate::config::selectors::SelectorConfig;
use crate::domain::model::{PageHarvest, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Hands back the rendered HTML of one listing page, or a page-level error
/// when the page never became ready.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFailurePolicy {
    Skip,
    Abort,
}

impl PageFailurePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn site_origin(&self) -> &str;
    fn page_urls(&self) -> Vec<String>;
    fn max_cards(&self) -> usize;
    fn selectors(&self) -> &SelectorConfig;
    fn output_path(&self) -> &str;
    fn snapshot_filename(&self) -> &str;
    fn write_csv(&self) -> bool;
    fn page_delay(&self) -> Duration;
    fn page_failure_policy(&self) -> PageFailurePolicy;
    fn dedupe_by_link(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PageHarvest>>;
    async fn transform(&self, pages: Vec<PageHarvest>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
