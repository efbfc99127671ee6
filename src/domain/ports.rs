use crate::domain::model::{
    CatalogReport, FailurePolicy, Projection, RawRecord, ValidationOutcome,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn output_path(&self) -> Option<&str>;
    fn failure_policy(&self) -> FailurePolicy;
    /// Index of the record whose title and projections are reported.
    fn featured_index(&self) -> usize;
    fn projections(&self) -> Result<Vec<Projection>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, records: Vec<RawRecord>) -> Result<ValidationOutcome>;
    async fn load(&self, outcome: ValidationOutcome) -> Result<CatalogReport>;
}
