//! Bundled sample rows

use crate::constants::SAMPLE_DATA_JSON;
use crate::types::{Person, RowId};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("sample data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate row id {0}")]
    DuplicateId(RowId),
}

/// Parse rows from JSON, rejecting collections where an id repeats.
pub fn parse_rows(json: &str) -> Result<Vec<Person>, DataError> {
    let rows: Vec<Person> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(rows.len());
    if let Some(dup) = rows.iter().find(|r| !seen.insert(r.id)) {
        return Err(DataError::DuplicateId(dup.id));
    }
    Ok(rows)
}

pub fn load() -> Result<Vec<Person>, DataError> {
    parse_rows(SAMPLE_DATA_JSON)
}
