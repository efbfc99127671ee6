use crate::domain::model::{BookRecord, Projection};
use crate::utils::error::{CatalogError, Result};
use std::collections::{BTreeMap, BTreeSet};

impl Projection {
    /// Builds a projection from optional include/exclude lists.
    ///
    /// Exactly one of the two must be given.
    pub fn from_parts(
        include: Option<Vec<String>>,
        exclude: Option<Vec<String>>,
    ) -> Result<Self> {
        match (include, exclude) {
            (Some(fields), None) => Ok(Projection::Include(fields.into_iter().collect())),
            (None, Some(fields)) => Ok(Projection::Exclude(fields.into_iter().collect())),
            (Some(_), Some(_)) => Err(CatalogError::InvalidProjection {
                message: "both include and exclude were given".to_string(),
            }),
            (None, None) => Err(CatalogError::InvalidProjection {
                message: "one of include or exclude is required".to_string(),
            }),
        }
    }

    /// Field names in the projection that `BookRecord` does not have.
    pub fn unknown_fields(&self) -> BTreeSet<&str> {
        self.field_names()
            .iter()
            .map(String::as_str)
            .filter(|name| !BookRecord::FIELDS.iter().any(|field| field == name))
            .collect()
    }
}

/// Projects a record to a field-name to value mapping.
///
/// Unknown names in the projection are ignored. Absent optionals project as `null`.
pub fn project(record: &BookRecord, projection: &Projection) -> BTreeMap<String, serde_json::Value> {
    record
        .fields()
        .into_iter()
        .filter(|(name, _)| match projection {
            Projection::Include(fields) => fields.contains(*name),
            Projection::Exclude(fields) => !fields.contains(*name),
        })
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
