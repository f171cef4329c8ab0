use crate::adapters::wiki_api::WikiApiClient;
use crate::core::aggregator::aggregate_revisions;
use crate::core::renderer::ChartRenderer;
use crate::core::{ConfigProvider, EditCountTable, Pipeline, Revision, Storage, TrendOutput};
use crate::utils::error::Result;
use std::path::Path;

pub struct EditTrendPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: WikiApiClient,
    renderer: ChartRenderer,
}

impl<S: Storage, C: ConfigProvider> EditTrendPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut client = WikiApiClient::new(config.api_endpoint())?;
        if let Some(timeout) = config.request_timeout() {
            client = client.with_timeout(timeout)?;
        }
        let renderer = ChartRenderer::new(config.chart_settings());

        Ok(Self {
            storage,
            config,
            client,
            renderer,
        })
    }

    fn output_location(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EditTrendPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Revision>> {
        let query = self.config.revision_query();
        let revisions = self.client.fetch_revisions(&query).await?;
        tracing::debug!(
            "Fetched {} revisions of '{}'",
            revisions.len(),
            query.title
        );
        Ok(revisions)
    }

    async fn transform(&self, revisions: Vec<Revision>) -> Result<EditCountTable> {
        let table = aggregate_revisions(&revisions);
        if let (Some(first), Some(last)) = (table.first_day(), table.last_day()) {
            tracing::debug!("Edit days span {} .. {}", first, last);
        }
        Ok(table)
    }

    async fn load(&self, table: EditCountTable) -> Result<TrendOutput> {
        let svg = self.renderer.render_svg(&table)?;
        let chart_filename = self.config.chart_filename();

        tracing::debug!("Writing chart ({} bytes) to storage", svg.len());
        self.storage
            .write_file(chart_filename, svg.as_bytes())
            .await?;

        let csv_path = match self.config.csv_filename() {
            Some(csv_filename) => {
                let csv = self.renderer.render_csv(&table)?;
                self.storage
                    .write_file(csv_filename, csv.as_bytes())
                    .await?;
                Some(self.output_location(csv_filename))
            }
            None => None,
        };

        Ok(TrendOutput {
            chart_path: self.output_location(chart_filename),
            csv_path,
            table,
        })
    }
}
