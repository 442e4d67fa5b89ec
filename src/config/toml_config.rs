use crate::config::paginate;
use crate::config::selectors::{SelectorConfig, DEFAULT_MAX_CARDS, DEFAULT_SITE_ORIGIN};
use crate::core::ConfigProvider;
use crate::domain::ports::PageFailurePolicy;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub harvest: HarvestConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// `http` fetches pages, `file` reads saved HTML.
    pub r#type: String,
    pub start_url: Option<String>,
    pub max_pages: Option<usize>,
    pub page_urls: Option<Vec<String>>,
    pub site_origin: Option<String>,
    pub page_delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub max_cards: Option<usize>,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub snapshot_filename: Option<String>,
    pub output_formats: Vec<String>,
    pub dedupe_by_link: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_page_failure: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HarvestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ENCAR_START_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn reads_saved_pages(&self) -> bool {
        self.source.r#type == "file"
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(15))
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.source.user_agent.as_deref()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("harvest.name", &self.harvest.name)?;
        validation::validate_one_of("source.type", &self.source.r#type, &["http", "file"])?;
        validation::validate_origin("source.site_origin", self.site_origin())?;

        match &self.source.page_urls {
            Some(urls) if !urls.is_empty() => {
                if !self.reads_saved_pages() {
                    for url in urls {
                        validation::validate_url("source.page_urls", url)?;
                    }
                }
            }
            _ => {
                let start_url =
                    validation::validate_required_field("source.start_url", &self.source.start_url)?;
                validation::validate_url("source.start_url", start_url)?;
            }
        }

        if let Some(pages) = self.source.max_pages {
            validation::validate_range("source.max_pages", pages, 1, 100)?;
        }
        if let Some(cards) = self.extract.max_cards {
            validation::validate_range("extract.max_cards", cards, 1, 500)?;
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;
        for format in &self.load.output_formats {
            validation::validate_one_of("load.output_formats", format, &["json", "csv"])?;
        }
        if !self.load.output_formats.iter().any(|f| f == "json") {
            return Err(HarvestError::InvalidConfigValueError {
                field: "load.output_formats".to_string(),
                value: self.load.output_formats.join(","),
                reason: "The JSON snapshot is always required".to_string(),
            });
        }

        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_page_failure.as_deref())
        {
            validation::validate_one_of("error_handling.on_page_failure", policy, &["skip", "abort"])?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn site_origin(&self) -> &str {
        self.source.site_origin.as_deref().unwrap_or(DEFAULT_SITE_ORIGIN)
    }

    fn page_urls(&self) -> Vec<String> {
        match &self.source.page_urls {
            Some(urls) if !urls.is_empty() => urls.clone(),
            _ => self
                .source
                .start_url
                .as_deref()
                .map(|start| paginate(start, self.source.max_pages.unwrap_or(1)))
                .unwrap_or_default(),
        }
    }

    fn max_cards(&self) -> usize {
        self.extract.max_cards.unwrap_or(DEFAULT_MAX_CARDS)
    }

    fn selectors(&self) -> &SelectorConfig {
        &self.extract.selectors
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn snapshot_filename(&self) -> &str {
        self.load.snapshot_filename.as_deref().unwrap_or("cars.json")
    }

    fn write_csv(&self) -> bool {
        self.load.output_formats.iter().any(|f| f == "csv")
    }

    fn page_delay(&self) -> Duration {
        Duration::from_millis(self.source.page_delay_ms.unwrap_or(1000))
    }

    fn page_failure_policy(&self) -> PageFailurePolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_page_failure.as_deref())
            .and_then(PageFailurePolicy::parse)
            .unwrap_or(PageFailurePolicy::Skip)
    }

    fn dedupe_by_link(&self) -> bool {
        self.load.dedupe_by_link.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
