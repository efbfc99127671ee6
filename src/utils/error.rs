use thiserror::Error;

/// Which ISBN-10 rule a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isbn10ErrorKind {
    WrongLength,
    BadChecksum,
}

impl std::fmt::Display for Isbn10ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Isbn10ErrorKind::WrongLength => write!(f, "wrong length"),
            Isbn10ErrorKind::BadChecksum => write!(f, "bad checksum"),
        }
    }
}

/// Why a single raw record could not become a `BookRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{message} (title: {title})")]
    IdentifierMissing { title: String, message: String },

    #[error("Field '{field}': {message}")]
    SchemaViolation { field: String, message: String },

    #[error("{message} (value: {value:?}, {kind})")]
    Isbn10Format {
        value: String,
        kind: Isbn10ErrorKind,
        message: String,
    },
}

impl ValidationError {
    pub fn schema(field: &str, message: impl Into<String>) -> Self {
        ValidationError::SchemaViolation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid projection: {message}")]
    InvalidProjection { message: String },

    #[error("Load error: {message}")]
    LoadError { message: String },

    #[error("Record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

impl CatalogError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::IoError(_) => "Check that the data file exists and is readable",
            CatalogError::SerializationError(_) | CatalogError::LoadError { .. } => {
                "The data file must contain a JSON array of book objects"
            }
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            CatalogError::InvalidProjection { .. } => {
                "Give each projection either an include list or an exclude list, not both"
            }
            CatalogError::InvalidRecord { .. } => {
                "Fix the record or rerun with --on-invalid skip"
            }
        }
    }

    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::InvalidRecord { .. } => 2,
            CatalogError::ConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::InvalidProjection { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
