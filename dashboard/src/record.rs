//! Job records and dataset parsing.
//!
//! DESIGN
//! ======
//! The dataset is a JSON array of job records. Elements are decoded one at a
//! time so a single malformed entry does not reject the whole file: entries
//! missing `work_year`, `job_title` or `salary_in_usd` (or carrying values of
//! the wrong type) are skipped and reported back to the caller, which decides
//! how loudly to log them. Descriptive fields default when absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Errors that reject a dataset as a whole.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("dataset read failed: {0}")]
    Read(String),

    /// The dataset text is not valid JSON.
    #[error("dataset parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset is valid JSON but not an array of records.
    #[error("dataset must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
}

// =============================================================================
// RECORD
// =============================================================================

/// One row of the salary dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub work_year: i32,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub employment_type: String,
    pub job_title: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub salary_currency: String,
    pub salary_in_usd: f64,
    #[serde(default)]
    pub employee_residence: String,
    /// Percentage of remote work, 0..=100.
    #[serde(default)]
    pub remote_ratio: u8,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub company_size: String,
}

/// An array element that was left out of the parsed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position of the element in the source array.
    pub index: usize,
    pub reason: String,
}

/// Result of parsing a dataset: accepted records plus skipped entries.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<JobRecord>,
    pub skipped: Vec<SkippedRecord>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a dataset document.
///
/// # Errors
///
/// Returns [`DatasetError::Parse`] for invalid JSON and
/// [`DatasetError::NotAnArray`] when the top-level value is not an array.
/// Malformed elements are never an error; they land in
/// [`ParsedRecords::skipped`].
pub fn parse_records(json: &str) -> Result<ParsedRecords, DatasetError> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Array(items) = root else {
        return Err(DatasetError::NotAnArray { found: json_kind(&root) });
    };

    let mut parsed = ParsedRecords::default();
    for (index, item) in items.into_iter().enumerate() {
        match decode_record(item) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => parsed.skipped.push(SkippedRecord { index, reason }),
        }
    }
    Ok(parsed)
}

fn decode_record(item: Value) -> Result<JobRecord, String> {
    if !item.is_object() {
        return Err(format!("expected an object, found {}", json_kind(&item)));
    }
    let record: JobRecord = serde_json::from_value(item).map_err(|e| e.to_string())?;
    if !record.salary_in_usd.is_finite() {
        return Err("salary_in_usd is not a finite number".to_string());
    }
    if record.remote_ratio > 100 {
        return Err(format!("remote_ratio {} exceeds 100", record.remote_ratio));
    }
    Ok(record)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
