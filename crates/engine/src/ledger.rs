//! The module contains `Ledger`, the ordered collection of tracked materials,
//! and the operations that change it.
//!
//! Every quantity operation is addressed by entry id. An unknown id is a
//! benign miss: the ledger is left as is and the operation reports `false`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, LedgerEntry, ResultEngine};

/// The tracked materials, in import order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LedgerEntry>", into = "Vec<LedgerEntry>")]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl TryFrom<Vec<LedgerEntry>> for Ledger {
    type Error = EngineError;

    fn try_from(entries: Vec<LedgerEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<Ledger> for Vec<LedgerEntry> {
    fn from(ledger: Ledger) -> Self {
        ledger.entries
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> ResultEngine<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(EngineError::InvalidSnapshot(format!(
                    "duplicate entry id {}",
                    entry.id()
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Wraps entries whose ids were all just generated.
    pub(crate) fn with_fresh_ids(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    fn apply(&mut self, id: Uuid, op: impl FnOnce(&mut LedgerEntry)) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id() == id) {
            Some(entry) => {
                op(entry);
                tracing::debug!(%id, held = entry.held(), "entry updated");
                true
            }
            None => {
                tracing::debug!(%id, "no entry with this id");
                false
            }
        }
    }

    /// Sets `held` to `value` clamped into `[0, required]`.
    pub fn set_available(&mut self, id: Uuid, value: i64) -> bool {
        self.apply(id, |entry| entry.set_held(value))
    }

    /// Sets the number of whole stacks held, keeping the partial stack.
    pub fn set_available_stacks(&mut self, id: Uuid, stacks: i64) -> bool {
        self.apply(id, |entry| entry.set_stacks(stacks))
    }

    /// Adds `amount`, capped at `required`.
    pub fn increment(&mut self, id: Uuid, amount: i64) -> bool {
        self.apply(id, |entry| entry.add(amount))
    }

    /// Removes `amount`, floored at 0.
    pub fn decrement(&mut self, id: Uuid, amount: i64) -> bool {
        self.apply(id, |entry| entry.remove(amount))
    }

    pub fn complete(&mut self, id: Uuid) -> bool {
        self.apply(id, LedgerEntry::complete)
    }

    pub fn reset(&mut self, id: Uuid) -> bool {
        self.apply(id, LedgerEntry::reset)
    }

    /// Removes an entry, returning it when found.
    pub fn delete(&mut self, id: Uuid) -> Option<LedgerEntry> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EntryCandidate;

    fn ledger(rows: &[(&str, i64, i64)]) -> Ledger {
        let entries = rows
            .iter()
            .filter_map(|(name, required, held)| {
                LedgerEntry::from_candidate(
                    Uuid::new_v4(),
                    EntryCandidate {
                        name: (*name).to_string(),
                        required: *required,
                        held: *held,
                    },
                )
            })
            .collect();
        Ledger::from_entries(entries).unwrap()
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut l = ledger(&[("Stone", 10, 5)]);
        let before = l.clone();
        let missing = Uuid::new_v4();
        assert!(!l.set_available(missing, 3));
        assert!(!l.set_available_stacks(missing, 3));
        assert!(!l.increment(missing, 3));
        assert!(!l.decrement(missing, 3));
        assert!(!l.complete(missing));
        assert!(!l.reset(missing));
        assert!(l.delete(missing).is_none());
        assert_eq!(l, before);
    }

    #[test]
    fn operations_touch_only_the_addressed_entry() {
        let mut l = ledger(&[("Stone", 10, 5), ("Glass", 20, 1)]);
        let stone = l.entries()[0].id();
        assert!(l.complete(stone));
        assert_eq!(l.entries()[0].held(), 10);
        assert_eq!(l.entries()[1].held(), 1);
    }

    #[test]
    fn set_available_twice_is_stable() {
        let mut l = ledger(&[("Stone", 10, 5)]);
        let id = l.entries()[0].id();
        l.set_available(id, 42);
        let once = l.clone();
        l.set_available(id, 42);
        assert_eq!(l, once);
        assert_eq!(l.get(id).unwrap().held(), 10);
    }

    #[test]
    fn delete_keeps_order() {
        let mut l = ledger(&[("A", 1, 0), ("B", 1, 0), ("C", 1, 0)]);
        let b = l.entries()[1].id();
        let removed = l.delete(b).unwrap();
        assert_eq!(removed.name(), "B");
        let names: Vec<_> = l.iter().map(LedgerEntry::name).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn clear_empties() {
        let mut l = ledger(&[("A", 1, 0), ("B", 1, 0)]);
        l.clear();
        assert!(l.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let l = ledger(&[("A", 1, 0)]);
        let entry = l.entries()[0].clone();
        let err = Ledger::from_entries(vec![entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSnapshot(_)));
    }

    #[test]
    fn json_round_trip_preserves_entries() {
        let l = ledger(&[("A", 3, 1), ("B", 64, 64)]);
        let json = serde_json::to_string(&l).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, l);
    }
}
