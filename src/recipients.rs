//! Recipient records and CSV/JSON list I/O.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fs::File, io::BufReader, path::Path};

/// Errors produced while reading or writing recipient lists.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem error.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that was being accessed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed CSV content.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Malformed JSON content.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A plain transfer target.
///
/// `amount` stays a decimal string here; conversion to minimal denomination
/// happens during plan building so a malformed value is attributed to its
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// SS58 address of the recipient.
    pub address: String,
    /// Token amount as a decimal string.
    pub amount: String,
}

/// A transfer target with a linear vesting grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestedRecipient {
    /// SS58 address of the recipient.
    pub address: String,
    /// Token amount as a decimal string.
    pub amount: String,
    /// Vesting duration in 28-day months.
    pub vested_months: u32,
    /// Block height at which the unlock begins.
    pub starting_block: u32,
}

/// Reads a recipient list from a CSV file with a header row.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    reader.deserialize().collect::<Result<Vec<T>, _>>().map_err(LoadError::from)
}

/// Reads a recipient list from a JSON array file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(LoadError::from)
}

/// Writes a list as a CSV file with a header row.
pub fn write_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<(), LoadError> {
    let file = create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Writes a list as a JSON array file.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<(), LoadError> {
    let file = create(path)?;
    serde_json::to_writer_pretty(file, records).map_err(LoadError::from)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path)
        .map_err(|source| LoadError::Io { path: path.display().to_string(), source })
}

fn create(path: &Path) -> Result<File, LoadError> {
    File::create(path)
        .map_err(|source| LoadError::Io { path: path.display().to_string(), source })
}
