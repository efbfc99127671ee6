//! Record validation: raw key/value input in, immutable `BookRecord` out.
//!
//! Checks run in a fixed order: identifier presence on the whole record,
//! then required and optional fields, then the ISBN-10 checksum.

use crate::domain::model::{BookRecord, RawRecord};
use crate::utils::error::{Isbn10ErrorKind, ValidationError};
use serde_json::Value;

const ISBN10_CHARS: &str = "0123456789Xx";
const UNKNOWN_TITLE: &str = "<unknown title>";

/// Validates one raw record.
pub fn validate(raw: &RawRecord) -> Result<BookRecord, ValidationError> {
    check_identifiers(raw)?;

    let title = required_string(raw, "title")?;
    if title.is_empty() {
        return Err(ValidationError::schema("title", "must not be empty"));
    }
    let author = required_string(raw, "author")?;
    let publisher = required_string(raw, "publisher")?;
    let price = required_price(raw)?;

    let isbn_10 = optional_string(raw, "isbn_10")?;
    let isbn_13 = optional_string(raw, "isbn_13")?;
    let subtitle = optional_string(raw, "subtitle")?;

    if let Some(isbn) = &isbn_10 {
        check_isbn10(isbn)?;
    }

    for key in raw.data.keys() {
        if !BookRecord::FIELDS.iter().any(|field| *field == key.as_str()) {
            tracing::debug!("Ignoring unknown field '{}' on '{}'", key, title);
        }
    }

    Ok(BookRecord::new_unchecked(
        title, author, publisher, price, isbn_10, isbn_13, subtitle,
    ))
}

/// Validates every record, keeping input order.
pub fn validate_all(records: &[RawRecord]) -> Vec<Result<BookRecord, ValidationError>> {
    records.iter().map(validate).collect()
}

/// Whole-record check: at least one identifier key must be present.
///
/// Only key presence counts; `"isbn_13": null` satisfies it.
pub fn check_identifiers(raw: &RawRecord) -> Result<(), ValidationError> {
    if raw.contains_key("isbn_10") || raw.contains_key("isbn_13") {
        return Ok(());
    }

    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    Err(ValidationError::IdentifierMissing {
        title,
        message: "Document should have either an ISBN10 or ISBN13".to_string(),
    })
}

/// Checks length and weighted checksum of an ISBN-10.
///
/// Characters outside `0-9`, `X` and `x` (hyphens, spaces) are dropped first.
pub fn check_isbn10(value: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = value.chars().filter(|c| ISBN10_CHARS.contains(*c)).collect();

    if chars.len() != 10 {
        return Err(ValidationError::Isbn10Format {
            value: value.to_string(),
            kind: Isbn10ErrorKind::WrongLength,
            message: "ISBN10 should be 10 digits".to_string(),
        });
    }

    if !matches!(isbn10_weighted_sum(&chars), Some(sum) if sum % 11 == 0) {
        return Err(ValidationError::Isbn10Format {
            value: value.to_string(),
            kind: Isbn10ErrorKind::BadChecksum,
            message: "ISBN10 should be divisible by 11".to_string(),
        });
    }

    Ok(())
}

/// Sum of `(10 - i) * value(i)` over the characters, with `X`/`x` worth 10.
///
/// Returns `None` if any character is not a digit, `X` or `x`.
pub fn isbn10_weighted_sum(chars: &[char]) -> Option<u32> {
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| Some(10u32.saturating_sub(i as u32) * isbn10_char_value(c)?))
        .sum()
}

fn isbn10_char_value(c: char) -> Option<u32> {
    match c {
        'X' | 'x' => Some(10),
        _ => c.to_digit(10),
    }
}

fn required_string(raw: &RawRecord, field: &str) -> Result<String, ValidationError> {
    match raw.get(field) {
        None | Some(Value::Null) => Err(ValidationError::schema(field, "field required")),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::schema(
            field,
            format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn optional_string(raw: &RawRecord, field: &str) -> Result<Option<String>, ValidationError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::schema(
            field,
            format!("expected a string or null, got {}", json_type(other)),
        )),
    }
}

fn required_price(raw: &RawRecord) -> Result<f64, ValidationError> {
    let price = match raw.get("price") {
        None | Some(Value::Null) => {
            return Err(ValidationError::schema("price", "field required"))
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            return Err(ValidationError::schema(
                "price",
                format!("expected a number, got {}", json_type(other)),
            ))
        }
    };

    match price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        Some(p) => Err(ValidationError::schema(
            "price",
            format!("must be a non-negative number, got {}", p),
        )),
        None => Err(ValidationError::schema("price", "not representable as a number")),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&RawRecord> for BookRecord {
    type Error = ValidationError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

impl BookRecord {
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationError> {
        validate(raw)
    }
}
