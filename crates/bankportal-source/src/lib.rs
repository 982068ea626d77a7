//! Transaction data source
//!
//! The ledger is seeded once from a static JSON array of records. The
//! source is abstracted behind an async trait so the file-backed source and
//! the in-memory source can be swapped.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod record;

pub use error::SourceError;
pub use record::Record;

/// Shared data source handle
pub type SourceRef = Arc<dyn DataSourceTrait>;

/// Anything the ledger can fetch its initial records from
#[async_trait]
pub trait DataSourceTrait: Send + Sync {
    /// Fetch the full record list
    async fn fetch(&self) -> Result<Vec<Record>, SourceError>;

    /// Human-readable description of where records come from
    fn describe(&self) -> String;
}

/// Parse a data file body into records.
///
/// The document must be a JSON array of objects; individual field values
/// are read leniently (see [`Record`]).
pub fn parse_records(content: &str, location: &str) -> Result<Vec<Record>, SourceError> {
    let document: Value = serde_json::from_str(content).map_err(|e| SourceError::MalformedJson {
        location: location.to_string(),
        message: e.to_string(),
    })?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::InvalidShape {
                location: location.to_string(),
                message: format!("expected an array of records, found {}", json_kind(&other)),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(SourceError::InvalidShape {
                location: location.to_string(),
                message: format!("record {} is {}, expected an object", index, json_kind(&item)),
            });
        }
        let record: Record = serde_json::from_value(item).map_err(|e| SourceError::MalformedJson {
            location: location.to_string(),
            message: format!("record {}: {}", index, e),
        })?;
        records.push(record);
    }

    Ok(records)
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

/// Records read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSourceTrait for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let location = self.path.to_string_lossy().to_string();
        log::debug!("Reading transaction records from {}", location);

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::IoError {
                location: location.clone(),
                source: e,
            })?;

        let records = parse_records(&content, &location)?;
        log::info!("Read {} records from {}", records.len(), location);
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fixed in-memory records
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
}

impl MemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DataSourceTrait for MemorySource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}

// ==================== Tests ====================
