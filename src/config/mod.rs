pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{ChartSettings, Margins, RevisionQuery};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_CHART_FILENAME: &str = "edit_counts.svg";
pub const DEFAULT_CSV_FILENAME: &str = "edit_counts.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "wiki-edit-trend")]
#[command(about = "Chart how often a wiki article is edited per day")]
pub struct CliConfig {
    #[arg(long, default_value = "Example_page", help = "Article title to query")]
    pub title: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_CHART_FILENAME)]
    pub chart_filename: String,

    #[arg(long, default_value = "960")]
    pub width: u32,

    #[arg(long, default_value = "500")]
    pub height: u32,

    #[arg(long, help = "Value for rvlimit (1-500, 1-50 when rvprop includes content); omitted when unset")]
    pub revision_limit: Option<u32>,

    #[arg(long, default_value = RevisionQuery::DEFAULT_RVPROP)]
    pub rvprop: String,

    #[arg(long, help = "Also write the day,count table as CSV")]
    pub csv: bool,

    #[arg(long, help = "Request timeout in seconds; no timeout when unset")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 測試與程式內建立設定時使用，值與命令列預設相同
    pub fn with_defaults(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            output_path: "./output".to_string(),
            chart_filename: DEFAULT_CHART_FILENAME.to_string(),
            width: 960,
            height: 500,
            revision_limit: None,
            rvprop: RevisionQuery::DEFAULT_RVPROP.to_string(),
            csv: false,
            timeout_seconds: None,
            verbose: false,
            log_format: LogFormat::Compact,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn article_title(&self) -> &str {
        &self.title
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn chart_filename(&self) -> &str {
        &self.chart_filename
    }

    fn csv_filename(&self) -> Option<&str> {
        self.csv.then_some(DEFAULT_CSV_FILENAME)
    }

    fn revision_query(&self) -> RevisionQuery {
        RevisionQuery::new(self.title.clone())
            .with_rvprop(self.rvprop.clone())
            .with_limit(self.revision_limit)
    }

    fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            width: self.width,
            height: self.height,
            margins: Margins::default(),
        }
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("chart_filename", &self.chart_filename)?;
        validation::validate_revision_query("query", &self.revision_query())?;
        validation::validate_chart_settings("chart", &self.chart_settings())?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 600)?;
        }
        Ok(())
    }
}
