//! The module contains the `LedgerEntry` type, one tracked material.
//!
//! Quantities are private so that `0 <= held <= required` and `required > 0`
//! hold for every value of the type, including deserialized ones.
use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BUNDLE_SIZE, EngineError, Stacks, record::EntryCandidate};

/// A material of the blueprint with its required and currently held count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct LedgerEntry {
    id: Uuid,
    name: String,
    #[serde(rename = "total")]
    required: i64,
    #[serde(rename = "available")]
    held: i64,
}

/// Unchecked shape of a persisted entry.
#[derive(Deserialize)]
struct StoredEntry {
    id: Uuid,
    name: String,
    total: i64,
    available: i64,
}

impl TryFrom<StoredEntry> for LedgerEntry {
    type Error = EngineError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        if stored.name.trim().is_empty() {
            return Err(EngineError::InvalidSnapshot(format!(
                "entry {} has an empty name",
                stored.id
            )));
        }
        if stored.total <= 0 {
            return Err(EngineError::InvalidSnapshot(format!(
                "entry {} requires {} items, must be > 0",
                stored.id, stored.total
            )));
        }
        if !(0..=stored.total).contains(&stored.available) {
            return Err(EngineError::InvalidSnapshot(format!(
                "entry {} holds {} of {} items",
                stored.id, stored.available, stored.total
            )));
        }
        Ok(Self {
            id: stored.id,
            name: stored.name,
            required: stored.total,
            held: stored.available,
        })
    }
}

impl LedgerEntry {
    /// Builds an entry from a normalized candidate, clamping `held`.
    ///
    /// Returns `None` when the candidate does not require anything.
    pub fn from_candidate(id: Uuid, candidate: EntryCandidate) -> Option<Self> {
        if candidate.required <= 0 {
            return None;
        }
        Some(Self {
            id,
            name: candidate.name,
            required: candidate.required,
            held: candidate.held.clamp(0, candidate.required),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> i64 {
        self.required
    }

    pub fn held(&self) -> i64 {
        self.held
    }

    /// Items still to collect.
    pub fn missing(&self) -> i64 {
        self.required - self.held
    }

    pub fn is_complete(&self) -> bool {
        self.held == self.required
    }

    /// Fraction collected, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.held as f64 / self.required as f64
    }

    /// Percentage collected, in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        self.progress() * 100.0
    }

    pub fn required_stacks(&self) -> Stacks {
        Stacks::from_items(self.required)
    }

    pub fn held_stacks(&self) -> Stacks {
        Stacks::from_items(self.held)
    }

    pub fn missing_stacks(&self) -> Stacks {
        Stacks::from_items(self.missing())
    }

    pub(crate) fn set_held(&mut self, value: i64) {
        self.held = value.clamp(0, self.required);
    }

    /// Sets the whole-stack count, keeping the partial stack of `held`.
    pub(crate) fn set_stacks(&mut self, stacks: i64) {
        let partial = self.held % BUNDLE_SIZE;
        self.set_held(stacks.saturating_mul(BUNDLE_SIZE).saturating_add(partial));
    }

    pub(crate) fn add(&mut self, amount: i64) {
        self.set_held(self.held.saturating_add(amount));
    }

    pub(crate) fn remove(&mut self, amount: i64) {
        self.set_held(self.held.saturating_sub(amount));
    }

    pub(crate) fn complete(&mut self) {
        self.held = self.required;
    }

    pub(crate) fn reset(&mut self) {
        self.held = 0;
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.name, self.held, self.required)
    }
}
