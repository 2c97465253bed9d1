//! Idiom source wire format parser.
//!
//! Decodes the JSON envelope served by idiom endpoints and validates the
//! records inside it.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::model::IdiomRecord;

/// The JSON envelope returned by an idiom endpoint.
///
/// `data` is a single record for one-idiom requests and a list otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdiomEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OneOrMany>,
    /// Size of the whole dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Number of records in `data` for multi-record responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Error message on failure responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(IdiomRecord),
    Many(Vec<IdiomRecord>),
}

impl IdiomEnvelope {
    /// Extract the validated records, failing on `success: false` or bad data.
    pub fn into_records(self) -> Result<Vec<IdiomRecord>, SourceError> {
        if !self.success {
            return Err(SourceError::Unsuccessful(
                self.error.unwrap_or_else(|| "no error message".to_string()),
            ));
        }

        let records = match self.data {
            Some(OneOrMany::One(record)) => vec![record],
            Some(OneOrMany::Many(records)) => records,
            None => Vec::new(),
        };

        if records.is_empty() {
            return Err(SourceError::EmptyDataset);
        }

        for record in &records {
            record.validate()?;
        }

        Ok(records)
    }
}

/// Parse an envelope from a JSON string and extract its records.
pub fn parse_envelope(content: &str) -> Result<Vec<IdiomRecord>, SourceError> {
    let envelope: IdiomEnvelope = serde_json::from_str(content)?;
    envelope.into_records()
}

/// Parse a bare JSON array of records (the on-disk dataset format).
///
/// Records failing validation are dropped with a warning rather than failing
/// the whole dataset.
pub fn parse_dataset(content: &str) -> Result<Vec<IdiomRecord>, SourceError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let total = raw.len();

    let records: Vec<IdiomRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            match serde_json::from_value::<IdiomRecord>(value)
                .map_err(SourceError::from)
                .and_then(|r| r.validate().map(|_| r))
            {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("skipping dataset entry {i}: {e}");
                    None
                }
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            "dataset: kept {} of {} entries",
            records.len(),
            total
        );
    }

    Ok(records)
}
