pub mod engine;
pub mod pipeline;
pub mod projection;
pub mod validator;

pub use crate::domain::model::{
    BookRecord, CatalogReport, FailurePolicy, FeaturedBook, Projection, RawRecord, RecordFailure,
    ValidationOutcome,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
