pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{storage::LocalStorage, wiki_api::WikiApiClient};
pub use config::toml_config::TomlConfig;
pub use core::{
    aggregator::{aggregate_by_day, aggregate_revisions},
    engine::TrendEngine,
    pipeline::EditTrendPipeline,
    renderer::ChartRenderer,
};
pub use domain::model::{ChartSettings, EditCountEntry, EditCountTable, Revision, TrendOutput};
pub use utils::error::{Result, TrendError};
