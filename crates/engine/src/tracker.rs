//! The module contains `Tracker`, the owner of the current ledger.
//!
//! A tracker loads its ledger once when built and saves it after every
//! committed change. The in-memory ledger is authoritative: when a save fails
//! the change is kept and the storage error is returned to the caller.

use uuid::Uuid;

use crate::{
    ImportReport, Ledger, LedgerEntry, LedgerStore, ResultEngine, ShoppingList, Stats, ViewQuery,
    export, import, view,
};

/// How the ledger was obtained at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored.
    Empty,
    /// A stored ledger with this many entries was restored.
    Restored(usize),
    /// Stored data could not be read; started from an empty ledger.
    Recovered(String),
}

#[derive(Debug)]
pub struct Tracker<S> {
    ledger: Ledger,
    store: S,
    loaded: LoadOutcome,
}

impl Tracker<()> {
    /// Return a builder for `Tracker`. Help to build the struct.
    pub fn builder() -> TrackerBuilder<()> {
        TrackerBuilder { store: () }
    }
}

impl<S: LedgerStore> Tracker<S> {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.loaded
    }

    fn commit(&mut self) -> ResultEngine<()> {
        self.store.save(&self.ledger).inspect_err(|err| {
            tracing::error!("failed to save ledger: {err}");
        })
    }

    fn commit_if(&mut self, changed: bool) -> ResultEngine<bool> {
        if changed {
            self.commit()?;
        }
        Ok(changed)
    }

    /// Replaces the whole ledger with the entries parsed from `payload`.
    ///
    /// A [`MalformedInput`] error leaves the ledger untouched. A storage error
    /// means the new ledger is in place but was not persisted.
    ///
    /// [`MalformedInput`]: crate::EngineError::MalformedInput
    pub fn import(&mut self, payload: impl AsRef<[u8]>) -> ResultEngine<ImportReport> {
        let imported = import::import_payload(payload)?;
        self.ledger = imported.ledger;
        self.commit()?;
        Ok(imported.report)
    }

    pub fn set_available(&mut self, id: Uuid, value: i64) -> ResultEngine<bool> {
        let changed = self.ledger.set_available(id, value);
        self.commit_if(changed)
    }

    pub fn set_available_stacks(&mut self, id: Uuid, stacks: i64) -> ResultEngine<bool> {
        let changed = self.ledger.set_available_stacks(id, stacks);
        self.commit_if(changed)
    }

    pub fn increment(&mut self, id: Uuid, amount: i64) -> ResultEngine<bool> {
        let changed = self.ledger.increment(id, amount);
        self.commit_if(changed)
    }

    pub fn decrement(&mut self, id: Uuid, amount: i64) -> ResultEngine<bool> {
        let changed = self.ledger.decrement(id, amount);
        self.commit_if(changed)
    }

    pub fn complete(&mut self, id: Uuid) -> ResultEngine<bool> {
        let changed = self.ledger.complete(id);
        self.commit_if(changed)
    }

    pub fn reset(&mut self, id: Uuid) -> ResultEngine<bool> {
        let changed = self.ledger.reset(id);
        self.commit_if(changed)
    }

    pub fn delete(&mut self, id: Uuid) -> ResultEngine<Option<LedgerEntry>> {
        let removed = self.ledger.delete(id);
        if removed.is_some() {
            tracing::info!(%id, "entry deleted");
            self.commit()?;
        }
        Ok(removed)
    }

    /// Empties the ledger. Callers confirm with the user first.
    pub fn clear(&mut self) -> ResultEngine<()> {
        tracing::info!(entries = self.ledger.len(), "ledger cleared");
        self.ledger.clear();
        self.commit()
    }

    pub fn stats(&self) -> Stats {
        view::compute_stats(&self.ledger)
    }

    pub fn view(&self, query: &ViewQuery) -> Vec<&LedgerEntry> {
        view::compute_view(&self.ledger, query)
    }

    pub fn shopping_list(&self) -> ShoppingList<'_> {
        view::compute_shopping_list(&self.ledger)
    }

    /// Exports the whole ledger in ledger order.
    pub fn export_csv(&self) -> ResultEngine<String> {
        export::export_csv(self.ledger.entries())
    }
}

/// The builder for `Tracker`
pub struct TrackerBuilder<S> {
    store: S,
}

impl<S> TrackerBuilder<S> {
    /// Pass the required store
    pub fn store<T: LedgerStore>(self, store: T) -> TrackerBuilder<T> {
        TrackerBuilder { store }
    }
}

impl<S: LedgerStore> TrackerBuilder<S> {
    /// Construct `Tracker`, loading the stored ledger.
    ///
    /// Never fails: missing data gives an empty ledger, unreadable data is
    /// logged and also gives an empty ledger.
    pub fn build(self) -> Tracker<S> {
        let (ledger, loaded) = match self.store.load() {
            Ok(Some(ledger)) => {
                let count = ledger.len();
                tracing::debug!(entries = count, "ledger restored");
                (ledger, LoadOutcome::Restored(count))
            }
            Ok(None) => (Ledger::new(), LoadOutcome::Empty),
            Err(err) => {
                tracing::warn!("stored ledger is unreadable, starting empty: {err}");
                (Ledger::new(), LoadOutcome::Recovered(err.to_string()))
            }
        };

        Tracker {
            ledger,
            store: self.store,
            loaded,
        }
    }
}
