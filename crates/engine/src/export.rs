//! Export serializer: ledger entries → delimited text with computed columns.

use csv::WriterBuilder;
use serde::Serialize;

use crate::{EngineError, LedgerEntry, ResultEngine};

/// Header row of an export, in column order.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Item",
    "Total",
    "Missing",
    "Available",
    "Total Stacks",
    "Available Stacks",
    "Progress %",
];

/// One exported line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Total")]
    pub total: i64,
    #[serde(rename = "Missing")]
    pub missing: i64,
    #[serde(rename = "Available")]
    pub available: i64,
    #[serde(rename = "Total Stacks")]
    pub total_stacks: String,
    #[serde(rename = "Available Stacks")]
    pub available_stacks: String,
    #[serde(rename = "Progress %")]
    pub progress: String,
}

impl From<&LedgerEntry> for ExportRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            item: entry.name().to_string(),
            total: entry.required(),
            missing: entry.missing(),
            available: entry.held(),
            total_stacks: entry.required_stacks().to_string(),
            available_stacks: entry.held_stacks().to_string(),
            progress: format_percent(entry.percent()),
        }
    }
}

/// One decimal place, ties rounded away from zero.
fn format_percent(percent: f64) -> String {
    format!("{:.1}", (percent * 10.0).round() / 10.0)
}

/// Serializes entries in the given order.
///
/// The header row is always written, even for an empty slice.
pub fn export_csv<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> ResultEngine<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|err| EngineError::Export(err.to_string()))?;

    for entry in entries {
        writer
            .serialize(ExportRow::from(entry))
            .map_err(|err| EngineError::Export(err.to_string()))?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))?;
    String::from_utf8(data).map_err(|err| EngineError::Export(err.to_string()))
}
