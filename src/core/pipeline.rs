use crate::core::projection::project;
use crate::core::validator::validate;
use crate::core::{
    BookRecord, CatalogReport, ConfigProvider, FailurePolicy, FeaturedBook, Pipeline, RawRecord,
    RecordFailure, Storage, ValidationOutcome,
};
use crate::utils::error::{CatalogError, Result};

pub const OUTPUT_FILE: &str = "books.json";

/// Loads a JSON array of book objects, validates each one and reports the result.
pub struct JsonCatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> JsonCatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn feature(&self, books: &[BookRecord]) -> Result<Option<FeaturedBook>> {
        let index = self.config.featured_index();
        let Some(book) = books.get(index) else {
            tracing::warn!(
                "Featured index {} is out of range ({} valid records)",
                index,
                books.len()
            );
            return Ok(None);
        };

        let projections = self
            .config
            .projections()?
            .iter()
            .map(|projection| project(book, projection))
            .collect();

        Ok(Some(FeaturedBook {
            index,
            title: book.title().to_string(),
            projections,
        }))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JsonCatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        tracing::debug!("Reading records from: {}", self.config.data_path());
        let bytes = self.storage.read_file(self.config.data_path()).await?;
        let json_data: serde_json::Value = serde_json::from_slice(&bytes)?;

        let serde_json::Value::Array(items) = json_data else {
            return Err(CatalogError::LoadError {
                message: format!(
                    "{}: top-level value must be an array",
                    self.config.data_path()
                ),
            });
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(obj) => Ok(RawRecord::from(obj)),
                _ => Err(CatalogError::LoadError {
                    message: format!("element {} is not an object", index),
                }),
            })
            .collect()
    }

    async fn transform(&self, records: Vec<RawRecord>) -> Result<ValidationOutcome> {
        let policy = self.config.failure_policy();
        let mut outcome = ValidationOutcome::default();

        for (index, record) in records.iter().enumerate() {
            match validate(record) {
                Ok(book) => {
                    tracing::debug!("Record {} valid: {}", index, book.title());
                    outcome.books.push(book);
                }
                Err(error) if policy == FailurePolicy::Abort => {
                    return Err(CatalogError::InvalidRecord {
                        index,
                        source: error,
                    });
                }
                Err(error) => {
                    tracing::warn!("Skipping record {}: {}", index, error);
                    outcome.failures.push(RecordFailure { index, error });
                }
            }
        }

        Ok(outcome)
    }

    async fn load(&self, outcome: ValidationOutcome) -> Result<CatalogReport> {
        let featured = self.feature(&outcome.books)?;

        let output_path = match self.config.output_path() {
            Some(dir) => {
                let path = format!("{}/{}", dir, OUTPUT_FILE);
                let json_data = serde_json::to_string_pretty(&outcome.books)?;
                tracing::debug!("Writing {} bytes to {}", json_data.len(), path);
                self.storage.write_file(&path, json_data.as_bytes()).await?;
                Some(path)
            }
            None => None,
        };

        Ok(CatalogReport {
            books: outcome.books,
            failures: outcome.failures,
            featured,
            output_path,
        })
    }
}
