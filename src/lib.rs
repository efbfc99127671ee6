pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    engine::CatalogEngine,
    pipeline::JsonCatalogPipeline,
    projection::project,
    validator::{check_isbn10, validate, validate_all},
};
pub use domain::model::{BookRecord, CatalogReport, FailurePolicy, Projection, RawRecord};
pub use utils::error::{CatalogError, Isbn10ErrorKind, Result, ValidationError};
