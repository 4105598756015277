//! Persistence of the ledger behind a small load/save trait.
//!
//! The engine never touches storage directly; a [`Tracker`] is handed a
//! [`LedgerStore`] and calls it once at startup and after every commit.
//!
//! [`Tracker`]: crate::Tracker

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Ledger, ResultEngine};

/// Well-known key the ledger is stored under.
pub const STORE_KEY: &str = "litematica_items";

/// Storage substrate for a single ledger.
pub trait LedgerStore {
    /// Returns the stored ledger, `None` when nothing was stored yet.
    fn load(&self) -> ResultEngine<Option<Ledger>>;

    /// Replaces the stored ledger.
    fn save(&mut self, ledger: &Ledger) -> ResultEngine<()>;
}

/// Stores the ledger as JSON in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<dir>/litematica_items.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> ResultEngine<Option<Ledger>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, ledger: &Ledger) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(ledger)?;
        // Write beside the target and rename so readers never see half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the serialized ledger in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    data: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already serialized payload, valid or not.
    pub fn with_raw(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> ResultEngine<Option<Ledger>> {
        match &self.data {
            Some(data) => Ok(Some(serde_json::from_str(data)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, ledger: &Ledger) -> ResultEngine<()> {
        self.data = Some(serde_json::to_string(ledger)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, import::import_payload};

    #[test]
    fn memory_store_starts_empty() {
        assert_eq!(MemoryStore::new().load().unwrap(), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let ledger = import_payload("Item,Total,Available\nA,3,1\n").unwrap().ledger;
        let mut store = MemoryStore::new();
        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), Some(ledger));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let store = MemoryStore::with_raw("{not json");
        assert!(matches!(store.load(), Err(EngineError::Serialization(_))));

        let store = MemoryStore::with_raw(r#"[{"id":"nope","name":"A","total":1,"available":0}]"#);
        assert!(store.load().is_err());
    }

    #[test]
    fn file_store_uses_well_known_key() {
        let store = JsonFileStore::in_dir("state");
        assert_eq!(store.path(), Path::new("state/litematica_items.json"));
    }
}
