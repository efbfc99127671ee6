use crate::domain::model::{BookRecord, Projection};
use crate::utils::error::{CatalogError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    path: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.iter().any(|allowed| *allowed == extension) => {
            Ok(())
        }
        Some(extension) => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// Rejects projections that name fields a `BookRecord` does not have.
pub fn validate_projection(field_name: &str, projection: &Projection) -> Result<()> {
    let unknown = projection.unknown_fields();
    if unknown.is_empty() {
        return Ok(());
    }

    Err(CatalogError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: unknown.into_iter().collect::<Vec<_>>().join(", "),
        reason: format!("Unknown field. Valid fields: {}", BookRecord::FIELDS.join(", ")),
    })
}
