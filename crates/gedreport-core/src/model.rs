//! Values exchanged between the pipeline stages
//!
//! Everything here is immutable once built: each stage receives these by
//! reference or by value and produces a new value for the next stage.

use crate::error::UploadFailure;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user-selected file as seen by the intake validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// How the file reached the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSource {
    /// Classic file picker; the OS dialog already filters on extension
    Picker,
    /// Drag and drop onto the drop zone
    Drop,
}

/// One pair of records the service suspects to be the same person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDuplicate {
    #[serde(default, deserialize_with = "present_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "present_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present_text")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub same_parents: bool,
    #[serde(deserialize_with = "record_id")]
    pub a_id: String,
    #[serde(deserialize_with = "record_id")]
    pub b_id: String,
}

/// Outcome of one submission to the duplicate-detection service
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// The service found nothing
    Empty,
    /// Candidates in the exact order the service returned them
    Found(Vec<CandidateDuplicate>),
    Failure(UploadFailure),
}

impl AnalysisResult {
    /// Build from a record list, mapping an empty list to `Empty`
    pub fn from_records(records: Vec<CandidateDuplicate>) -> Self {
        if records.is_empty() {
            AnalysisResult::Empty
        } else {
            AnalysisResult::Found(records)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, AnalysisResult::Found(records) if !records.is_empty())
    }

    pub fn failure(&self) -> Option<&UploadFailure> {
        match self {
            AnalysisResult::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Empty strings are treated as missing so the formatter substitutes a placeholder
fn present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// GEDCOM cross-reference ids usually arrive as strings, but accept numbers too
fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a record id, found {}",
            other
        ))),
    }
}
