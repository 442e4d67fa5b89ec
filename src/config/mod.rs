pub mod cli;
pub mod selectors;
pub mod toml_config;

use regex::Regex;
use std::sync::LazyLock;

static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&])page=\d+").expect("page pattern compiles"));

/// Listing URLs for pages `1..=max_pages`, built by rewriting the `page`
/// query parameter of `start_url` (appended when missing).
pub fn paginate(start_url: &str, max_pages: usize) -> Vec<String> {
    (1..=max_pages)
        .map(|page| {
            if PAGE_PARAM.is_match(start_url) {
                PAGE_PARAM
                    .replace(start_url, format!("${{1}}page={}", page))
                    .into_owned()
            } else {
                let separator = if start_url.contains('?') { '&' } else { '?' };
                format!("{}{}page={}", start_url, separator, page)
            }
        })
        .collect()
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::paginate;
    use crate::adapters::http::DEFAULT_USER_AGENT;
    use crate::config::selectors::{
        SelectorConfig, DEFAULT_MAX_CARDS, DEFAULT_SITE_ORIGIN, DEFAULT_START_URL,
    };
    use crate::core::ConfigProvider;
    use crate::domain::ports::PageFailurePolicy;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "car-harvest")]
    #[command(about = "Harvest car listings from a rendered listing page into a JSON snapshot")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_START_URL)]
        pub start_url: String,

        #[arg(long, default_value = "1")]
        pub max_pages: usize,

        /// Explicit listing URLs; overrides --start-url/--max-pages
        #[arg(long, value_delimiter = ',')]
        pub page_url: Vec<String>,

        /// Saved rendered HTML files to harvest instead of fetching
        #[arg(long, value_delimiter = ',')]
        pub input: Vec<String>,

        #[arg(long, default_value = DEFAULT_SITE_ORIGIN)]
        pub site_origin: String,

        #[arg(long, default_value_t = DEFAULT_MAX_CARDS)]
        pub max_cards: usize,

        #[arg(long, default_value = "./site/data")]
        pub output_path: String,

        #[arg(long, default_value = "cars.json")]
        pub snapshot_filename: String,

        #[arg(long, help = "Also write a CSV export next to the snapshot")]
        pub csv: bool,

        #[arg(long, default_value = "1000")]
        pub page_delay_ms: u64,

        #[arg(long, default_value = "15")]
        pub timeout_secs: u64,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        pub user_agent: String,

        /// What to do when a page cannot be harvested: skip or abort
        #[arg(long, default_value = "skip")]
        pub on_page_failure: String,

        #[arg(long, help = "Keep only the first listing per detail link")]
        pub dedupe_by_link: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,

        #[arg(skip)]
        pub selectors: SelectorConfig,
    }

    impl CliConfig {
        pub fn uses_saved_pages(&self) -> bool {
            !self.input.is_empty()
        }

        pub fn timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_secs)
        }
    }

    impl ConfigProvider for CliConfig {
        fn site_origin(&self) -> &str {
            &self.site_origin
        }

        fn page_urls(&self) -> Vec<String> {
            if self.uses_saved_pages() {
                self.input.clone()
            } else if !self.page_url.is_empty() {
                self.page_url.clone()
            } else {
                paginate(&self.start_url, self.max_pages)
            }
        }

        fn max_cards(&self) -> usize {
            self.max_cards
        }

        fn selectors(&self) -> &SelectorConfig {
            &self.selectors
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn snapshot_filename(&self) -> &str {
            &self.snapshot_filename
        }

        fn write_csv(&self) -> bool {
            self.csv
        }

        fn page_delay(&self) -> Duration {
            Duration::from_millis(self.page_delay_ms)
        }

        fn page_failure_policy(&self) -> PageFailurePolicy {
            PageFailurePolicy::parse(&self.on_page_failure).unwrap_or(PageFailurePolicy::Skip)
        }

        fn dedupe_by_link(&self) -> bool {
            self.dedupe_by_link
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_origin("site_origin", &self.site_origin)?;
            if !self.uses_saved_pages() {
                if self.page_url.is_empty() {
                    validation::validate_url("start_url", &self.start_url)?;
                    validation::validate_range("max_pages", self.max_pages, 1, 100)?;
                }
                for url in &self.page_url {
                    validation::validate_url("page_url", url)?;
                }
            }
            validation::validate_range("max_cards", self.max_cards, 1, 500)?;
            validation::validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_non_empty_string("snapshot_filename", &self.snapshot_filename)?;
            validation::validate_one_of("on_page_failure", &self.on_page_failure, &["skip", "abort"])?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_paginate_start_url() {
            let config = CliConfig::parse_from(["car-harvest", "--max-pages", "2"]);
            let urls = config.page_urls();
            assert_eq!(urls.len(), 2);
            assert!(urls[0].starts_with("https://car.encar.com/list/car?page=1&"));
            assert!(urls[1].starts_with("https://car.encar.com/list/car?page=2&"));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_saved_pages_take_precedence() {
            let config = CliConfig::parse_from([
                "car-harvest",
                "--input",
                "a.html,b.html",
                "--page-url",
                "https://car.encar.com/list/car?page=3",
            ]);
            assert_eq!(config.page_urls(), vec!["a.html", "b.html"]);
        }

        #[test]
        fn test_rejects_unknown_failure_policy() {
            let config = CliConfig::parse_from(["car-harvest", "--on-page-failure", "retry"]);
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_rewrites_page_param() {
        let urls = paginate("https://car.encar.com/list/car?page=1&sort=new", 3);
        assert_eq!(
            urls,
            vec![
                "https://car.encar.com/list/car?page=1&sort=new",
                "https://car.encar.com/list/car?page=2&sort=new",
                "https://car.encar.com/list/car?page=3&sort=new",
            ]
        );
    }

    #[test]
    fn test_paginate_appends_missing_param() {
        assert_eq!(
            paginate("https://car.encar.com/list/car", 1),
            vec!["https://car.encar.com/list/car?page=1"]
        );
        assert_eq!(
            paginate("https://car.encar.com/list/car?sort=new", 1),
            vec!["https://car.encar.com/list/car?sort=new&page=1"]
        );
    }

    #[test]
    fn test_paginate_ignores_similar_params() {
        assert_eq!(
            paginate("https://x.com/list?subpage=4", 1),
            vec!["https://x.com/list?subpage=4&page=1"]
        );
    }
}
