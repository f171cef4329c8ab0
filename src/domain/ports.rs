use crate::domain::model::{ChartSettings, EditCountTable, Revision, RevisionQuery, TrendOutput};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn article_title(&self) -> &str;
    fn output_path(&self) -> &str;
    fn chart_filename(&self) -> &str;
    /// `None` 表示不輸出 CSV
    fn csv_filename(&self) -> Option<&str>;
    fn revision_query(&self) -> RevisionQuery;
    fn chart_settings(&self) -> ChartSettings;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Revision>>;
    async fn transform(&self, revisions: Vec<Revision>) -> Result<EditCountTable>;
    async fn load(&self, table: EditCountTable) -> Result<TrendOutput>;
}
