use crate::core::{Pipeline, TrendOutput};
use crate::utils::error::Result;

/// 依序執行 extract → transform → load，任一階段失敗即停止
pub struct TrendEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> TrendEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<TrendOutput> {
        tracing::info!("Starting edit trend run");

        tracing::info!("Fetching revisions...");
        let revisions = self.pipeline.extract().await.map_err(|e| {
            tracing::error!("Fetch failed ({:?}): {}", e.category(), e);
            e
        })?;
        tracing::info!("Fetched {} revisions", revisions.len());

        tracing::info!("Aggregating edits per day...");
        let table = self.pipeline.transform(revisions).await.map_err(|e| {
            tracing::error!("Aggregation failed ({:?}): {}", e.category(), e);
            e
        })?;
        tracing::info!(
            "Aggregated {} edits over {} days",
            table.total_edits(),
            table.len()
        );

        tracing::info!("Rendering chart...");
        let output = self.pipeline.load(table).await.map_err(|e| {
            tracing::error!("Rendering failed ({:?}): {}", e.category(), e);
            e
        })?;
        tracing::info!("Chart saved to: {}", output.chart_path);
        if let Some(csv_path) = &output.csv_path {
            tracing::info!("Edit counts saved to: {}", csv_path);
        }

        Ok(output)
    }
}
