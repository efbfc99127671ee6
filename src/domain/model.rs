use serde::{Deserialize, Serialize};
use crate::utils::error::ValidationError;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One untyped input record, as handed over by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub data: HashMap<String, serde_json::Value>,
}

impl RawRecord {
    pub fn new(data: HashMap<String, serde_json::Value>) -> Self {
        Self { data }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for RawRecord {
    fn from(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }
}

/// A validated book.
///
/// Fields are private and there are no setters, so a record cannot change
/// after validation:
///
/// ```compile_fail
/// use book_catalog::{validate, RawRecord};
///
/// let raw: RawRecord = serde_json::from_value(serde_json::json!({
///     "data": {
///         "title": "Dune", "author": "Frank Herbert",
///         "publisher": "Chilton", "price": 9.99, "isbn_13": "9780441013593"
///     }
/// })).unwrap();
/// let mut book = validate(&raw).unwrap();
/// book.title = "Another title".to_string();
/// ```
///
/// The same record read through its getters compiles and runs:
///
/// ```rust
/// use book_catalog::{validate, RawRecord};
///
/// let raw: RawRecord = serde_json::from_value(serde_json::json!({
///     "data": {
///         "title": "Dune", "author": "Frank Herbert",
///         "publisher": "Chilton", "price": 9.99, "isbn_13": "9780441013593"
///     }
/// })).unwrap();
/// let book = validate(&raw).unwrap();
/// assert_eq!(book.title(), "Dune");
/// ```
///
/// To derive a changed record, edit [`BookRecord::to_raw`] and validate it again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    title: String,
    author: String,
    publisher: String,
    price: f64,
    isbn_10: Option<String>,
    isbn_13: Option<String>,
    subtitle: Option<String>,
}

impl BookRecord {
    /// Field names in declaration order.
    pub const FIELDS: [&'static str; 7] = [
        "title",
        "author",
        "publisher",
        "price",
        "isbn_10",
        "isbn_13",
        "subtitle",
    ];

    // Only the validator builds records.
    pub(crate) fn new_unchecked(
        title: String,
        author: String,
        publisher: String,
        price: f64,
        isbn_10: Option<String>,
        isbn_13: Option<String>,
        subtitle: Option<String>,
    ) -> Self {
        Self {
            title,
            author,
            publisher,
            price,
            isbn_10,
            isbn_13,
            subtitle,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn isbn_10(&self) -> Option<&str> {
        self.isbn_10.as_deref()
    }

    pub fn isbn_13(&self) -> Option<&str> {
        self.isbn_13.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Every field paired with its JSON value, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, serde_json::Value)> {
        fn optional(value: &Option<String>) -> serde_json::Value {
            value
                .as_ref()
                .map(|v| serde_json::Value::String(v.clone()))
                .unwrap_or(serde_json::Value::Null)
        }

        vec![
            ("title", serde_json::Value::String(self.title.clone())),
            ("author", serde_json::Value::String(self.author.clone())),
            ("publisher", serde_json::Value::String(self.publisher.clone())),
            (
                "price",
                serde_json::Number::from_f64(self.price)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            ),
            ("isbn_10", optional(&self.isbn_10)),
            ("isbn_13", optional(&self.isbn_13)),
            ("subtitle", optional(&self.subtitle)),
        ]
    }

    /// Copy of the record as raw input. Absent optionals become `null`.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            data: self
                .fields()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

/// What the collaborator does with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and keep going.
    Skip,
    /// Stop at the first invalid record.
    #[default]
    Abort,
}

/// Field selection applied to a validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Include(BTreeSet<String>),
    Exclude(BTreeSet<String>),
}

impl Projection {
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Include(fields.into_iter().map(Into::into).collect())
    }

    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Exclude(fields.into_iter().map(Into::into).collect())
    }

    pub fn field_names(&self) -> &BTreeSet<String> {
        match self {
            Projection::Include(fields) | Projection::Exclude(fields) => fields,
        }
    }
}

/// A record the validator rejected, with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub index: usize,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub books: Vec<BookRecord>,
    pub failures: Vec<RecordFailure>,
}

/// The featured record: its title plus one mapping per requested projection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedBook {
    pub index: usize,
    pub title: String,
    pub projections: Vec<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub struct CatalogReport {
    pub books: Vec<BookRecord>,
    pub failures: Vec<RecordFailure>,
    pub featured: Option<FeaturedBook>,
    pub output_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookRecord {
        BookRecord::new_unchecked(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "Chilton".to_string(),
            9.99,
            None,
            Some("9780441013593".to_string()),
            None,
        )
    }

    #[test]
    fn test_to_raw_contains_every_field() {
        let raw = sample().to_raw();
        assert_eq!(raw.data.len(), BookRecord::FIELDS.len());
        assert_eq!(raw.get("isbn_10"), Some(&serde_json::Value::Null));
        assert_eq!(
            raw.get("isbn_13").and_then(|v| v.as_str()),
            Some("9780441013593")
        );
    }

    #[test]
    fn test_fields_follow_declaration_order() {
        let names: Vec<&str> = sample().fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, BookRecord::FIELDS.to_vec());
    }

    #[test]
    fn test_failure_policy_serde() {
        let policy: FailurePolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, FailurePolicy::Skip);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
    }
}
