//! Import pipeline: delimited text → raw records → a fresh ledger.
//!
//! Parsing is all-or-nothing. A payload that cannot be read as a header-driven
//! table yields [`EngineError::MalformedInput`] and no ledger at all, so the
//! caller's current ledger is never partially replaced. Rows with fewer or
//! more cells than the header are still read; absent cells count as empty.

use csv::{ReaderBuilder, Trim};
use uuid::Uuid;

use crate::{
    EngineError, Ledger, LedgerEntry, ResultEngine,
    record::{RawRecord, RawValue, normalize_record},
};

/// Counters describing one import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Non-blank data rows read from the payload.
    pub rows: usize,
    /// Rows that became ledger entries.
    pub imported: usize,
    /// Rows dropped because they required nothing.
    pub skipped: usize,
}

/// Result of a successful import.
#[derive(Clone, Debug, PartialEq)]
pub struct Imported {
    pub ledger: Ledger,
    pub report: ImportReport,
}

/// Parses a delimited payload with a header row into typed records.
///
/// Blank lines and rows whose cells are all blank are skipped. Cells are
/// type-inferred with [`RawValue::infer`].
pub fn parse_records(payload: impl AsRef<[u8]>) -> ResultEngine<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(payload.as_ref());

    let headers = reader
        .headers()
        .map_err(|err| EngineError::MalformedInput(err.to_string()))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| EngineError::MalformedInput(err.to_string()))?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(field, cell)| (field, RawValue::infer(cell)))
            .collect();
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Normalizes records in order and assigns each surviving row a fresh id.
pub fn build_ledger(records: impl IntoIterator<Item = RawRecord>) -> Imported {
    let mut report = ImportReport::default();
    let mut entries = Vec::new();

    for record in records {
        report.rows += 1;
        let entry = normalize_record(&record)
            .and_then(|candidate| LedgerEntry::from_candidate(Uuid::new_v4(), candidate));
        match entry {
            Some(entry) => entries.push(entry),
            None => report.skipped += 1,
        }
    }
    report.imported = entries.len();

    Imported {
        ledger: Ledger::with_fresh_ids(entries),
        report,
    }
}

/// Parses and normalizes a payload into a new ledger.
pub fn import_payload(payload: impl AsRef<[u8]>) -> ResultEngine<Imported> {
    let records = parse_records(payload)?;
    let imported = build_ledger(records);
    tracing::info!(
        rows = imported.report.rows,
        imported = imported.report.imported,
        skipped = imported.report.skipped,
        "payload imported"
    );
    Ok(imported)
}
