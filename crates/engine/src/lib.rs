//! Material ledger engine.
//!
//! Tracks how many of each material a blueprint requires and how many have
//! been collected. A [`Ledger`] is built by importing a delimited payload,
//! changed through id-addressed operations that keep
//! `0 <= held <= required`, and projected into [`Stats`], filtered views, a
//! [`ShoppingList`] and a CSV export.
//!
//! The engine performs no I/O of its own apart from the [`LedgerStore`]
//! implementations handed to a [`Tracker`].

pub use entry::LedgerEntry;
pub use error::EngineError;
pub use export::{EXPORT_HEADERS, ExportRow, export_csv};
pub use import::{ImportReport, Imported, build_ledger, import_payload, parse_records};
pub use ledger::Ledger;
pub use record::{
    EntryCandidate, HELD_FIELDS, NAME_FIELDS, REQUIRED_FIELDS, RawRecord, RawValue, UNKNOWN_NAME,
    normalize_record,
};
pub use stacks::{BUNDLE_SIZE, Stacks, format_stacks};
pub use store::{JsonFileStore, LedgerStore, MemoryStore, STORE_KEY};
pub use tracker::{LoadOutcome, Tracker, TrackerBuilder};
pub use view::{
    FilterMode, ShoppingList, ShoppingListEntry, SortKey, Stats, ViewQuery, compute_shopping_list,
    compute_stats, compute_view,
};

mod entry;
mod error;
mod export;
mod import;
mod ledger;
mod record;
mod stacks;
mod store;
mod tracker;
mod view;

type ResultEngine<T> = Result<T, EngineError>;
