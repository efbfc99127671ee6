use crate::core::{CatalogReport, Pipeline};
use crate::utils::error::Result;

pub struct CatalogEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CatalogEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<CatalogReport> {
        tracing::info!("Starting catalog validation");

        tracing::info!("Loading records...");
        let raw_records = self.pipeline.extract().await?;
        tracing::info!("Loaded {} records", raw_records.len());

        tracing::info!("Validating records...");
        let outcome = self.pipeline.transform(raw_records).await?;
        tracing::info!(
            "Validated {} records, rejected {}",
            outcome.books.len(),
            outcome.failures.len()
        );

        let report = self.pipeline.load(outcome).await?;
        if let Some(path) = &report.output_path {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(report)
    }
}
