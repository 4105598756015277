//! Derived views over a ledger: aggregate stats, the filtered/sorted display
//! list and the shopping list.
//!
//! Everything here borrows the ledger immutably and is recomputed on demand.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{Ledger, LedgerEntry, Stacks};

/// Aggregate counters over a whole ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_needed: i64,
    pub total_collected: i64,
    pub total_missing: i64,
    pub completed_items: usize,
    pub item_count: usize,
}

impl Stats {
    /// Collected over needed, in percent. Zero for an empty ledger.
    pub fn overall_progress(&self) -> f64 {
        if self.total_needed == 0 {
            return 0.0;
        }
        self.total_collected as f64 / self.total_needed as f64 * 100.0
    }

    pub fn needed_stacks(&self) -> Stacks {
        Stacks::from_items(self.total_needed)
    }

    pub fn collected_stacks(&self) -> Stacks {
        Stacks::from_items(self.total_collected)
    }

    pub fn missing_stacks(&self) -> Stacks {
        Stacks::from_items(self.total_missing)
    }
}

pub fn compute_stats(ledger: &Ledger) -> Stats {
    ledger.iter().fold(Stats::default(), |mut acc, entry| {
        acc.total_needed = acc.total_needed.saturating_add(entry.required());
        acc.total_collected = acc.total_collected.saturating_add(entry.held());
        acc.total_missing = acc.total_missing.saturating_add(entry.missing());
        if entry.is_complete() {
            acc.completed_items += 1;
        }
        acc.item_count += 1;
        acc
    })
}

/// Which entries a view keeps, by completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl FilterMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        }
    }

    fn keeps(self, entry: &LedgerEntry) -> bool {
        match self {
            Self::All => true,
            Self::Incomplete => !entry.is_complete(),
            Self::Complete => entry.is_complete(),
        }
    }
}

/// Display order of a view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Name, ascending.
    #[default]
    Name,
    /// Missing amount, largest first.
    Missing,
    /// Fraction collected, least complete first.
    Progress,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Missing => "missing",
            Self::Progress => "progress",
        }
    }

    fn compare(self, a: &LedgerEntry, b: &LedgerEntry) -> Ordering {
        match self {
            Self::Name => compare_names(a.name(), b.name()),
            Self::Missing => b.missing().cmp(&a.missing()),
            Self::Progress => compare_progress(a, b),
        }
    }
}

macro_rules! str_enum {
    ($ty:ty, $label:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$(<$ty>::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("unknown {}: {s}", $label))
            }
        }
    };
}

str_enum!(FilterMode, "filter", [All, Incomplete, Complete]);
str_enum!(SortKey, "sort key", [Name, Missing, Progress]);

/// Collation key: compatibility-decomposed, accents dropped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Compares `held / required` exactly by cross-multiplying.
fn compare_progress(a: &LedgerEntry, b: &LedgerEntry) -> Ordering {
    let left = i128::from(a.held()) * i128::from(b.required());
    let right = i128::from(b.held()) * i128::from(a.required());
    left.cmp(&right)
}

/// Search, filter and sort settings for the display list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search: String,
    pub filter: FilterMode,
    pub sort: SortKey,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Filters then stably sorts the ledger for display.
pub fn compute_view<'a>(ledger: &'a Ledger, query: &ViewQuery) -> Vec<&'a LedgerEntry> {
    let needle = query.search.to_lowercase();
    let mut view: Vec<&LedgerEntry> = ledger
        .iter()
        .filter(|entry| entry.name().to_lowercase().contains(&needle))
        .filter(|entry| query.filter.keeps(entry))
        .collect();
    view.sort_by(|a, b| query.sort.compare(a, b));
    view
}

/// One outstanding material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShoppingListEntry<'a> {
    pub entry: &'a LedgerEntry,
    pub missing: i64,
}

impl ShoppingListEntry<'_> {
    pub fn missing_stacks(&self) -> Stacks {
        Stacks::from_items(self.missing)
    }
}

/// Outstanding materials, largest deficit first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShoppingList<'a> {
    pub items: Vec<ShoppingListEntry<'a>>,
    pub total_missing: i64,
    pub total_missing_stacks: Stacks,
}

impl ShoppingList<'_> {
    /// `true` when every material has been collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn compute_shopping_list(ledger: &Ledger) -> ShoppingList<'_> {
    let mut items: Vec<ShoppingListEntry<'_>> = ledger
        .iter()
        .filter(|entry| !entry.is_complete())
        .map(|entry| ShoppingListEntry {
            entry,
            missing: entry.missing(),
        })
        .collect();
    items.sort_by(|a, b| b.missing.cmp(&a.missing));

    let total_missing = items
        .iter()
        .fold(0_i64, |acc, item| acc.saturating_add(item.missing));
    ShoppingList {
        items,
        total_missing,
        total_missing_stacks: Stacks::from_items(total_missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::import_payload;

    fn ledger(payload: &str) -> Ledger {
        import_payload(payload).unwrap().ledger
    }

    fn names<'a>(view: &[&'a LedgerEntry]) -> Vec<&'a str> {
        view.iter().copied().map(LedgerEntry::name).collect()
    }

    #[test]
    fn stats_of_empty_ledger() {
        let stats = compute_stats(&Ledger::new());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.overall_progress(), 0.0);
    }

    #[test]
    fn stats_accumulate() {
        let l = ledger("Item,Total,Available\nA,100,25\nB,64,64\nC,36,11\n");
        let stats = compute_stats(&l);
        assert_eq!(stats.total_needed, 200);
        assert_eq!(stats.total_collected, 100);
        assert_eq!(stats.total_missing, 100);
        assert_eq!(stats.completed_items, 1);
        assert_eq!(stats.item_count, 3);
        assert_eq!(stats.overall_progress(), 50.0);
        assert_eq!(stats.needed_stacks().to_string(), "3s 8i");
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let l = ledger("Item,Total\nA,99999999999999999999\nB,99999999999999999999\nC,5\n");
        assert_eq!(l.len(), 3);
        let stats = compute_stats(&l);
        assert_eq!(stats.total_needed, i64::MAX);
        assert_eq!(stats.total_missing, i64::MAX);
        assert_eq!(stats.total_collected, 0);
        assert_eq!(stats.overall_progress(), 0.0);

        let list = compute_shopping_list(&l);
        assert_eq!(list.len(), 3);
        assert_eq!(list.total_missing, i64::MAX);
        assert!(list.total_missing >= 0);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let l = ledger("Item,Total\nOak Planks,1\nDark Oak Log,1\nGlass,1\n");
        let view = compute_view(&l, &ViewQuery::new().search("OAK"));
        assert_eq!(names(&view), ["Dark Oak Log", "Oak Planks"]);
    }

    #[test]
    fn filter_modes() {
        let l = ledger("Item,Total,Available\nA,5,5\nB,5,1\nC,5,0\n");
        let complete = compute_view(&l, &ViewQuery::new().filter(FilterMode::Complete));
        assert_eq!(names(&complete), ["A"]);
        let incomplete = compute_view(&l, &ViewQuery::new().filter(FilterMode::Incomplete));
        assert_eq!(names(&incomplete), ["B", "C"]);
        assert_eq!(compute_view(&l, &ViewQuery::new()).len(), 3);
    }

    #[test]
    fn sort_by_name_ignores_case_and_accents() {
        let l = ledger("Item,Total\nbirch,1\nÉcorce,1\nAndesite,1\ndirt,1\n");
        let view = compute_view(&l, &ViewQuery::new());
        assert_eq!(names(&view), ["Andesite", "birch", "dirt", "Écorce"]);
    }

    #[test]
    fn sort_by_progress_least_complete_first() {
        let l = ledger("Item,Total,Available\nHalf,10,5\nThird,3,1\nDone,7,7\nNone,9,0\n");
        let view = compute_view(&l, &ViewQuery::new().sort(SortKey::Progress));
        assert_eq!(names(&view), ["None", "Third", "Half", "Done"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let l = ledger("Item,Total,Available\nFirst,10,5\nSecond,20,15\nThird,8,3\n");
        let view = compute_view(&l, &ViewQuery::new().sort(SortKey::Missing));
        assert_eq!(names(&view), ["First", "Second", "Third"]);
    }

    #[test]
    fn shopping_list_orders_by_deficit() {
        let l = ledger("Item,Total,Available\nA,10,9\nB,64,0\nC,5,5\nD,30,10\n");
        let list = compute_shopping_list(&l);
        let listed: Vec<_> = list.items.iter().map(|i| (i.entry.name(), i.missing)).collect();
        assert_eq!(listed, [("B", 64), ("D", 20), ("A", 1)]);
        assert_eq!(list.total_missing, 85);
        assert_eq!(list.total_missing_stacks.to_string(), "1s 21i");
        assert_eq!(list.items[0].missing_stacks().to_string(), "1s");
    }

    #[test]
    fn shopping_list_empty_when_all_collected() {
        let l = ledger("Item,Total,Available\nA,10,10\n");
        let list = compute_shopping_list(&l);
        assert!(list.is_empty());
        assert_eq!(list.total_missing_stacks.to_string(), "0s");
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("Incomplete".parse::<FilterMode>(), Ok(FilterMode::Incomplete));
        assert_eq!(" progress ".parse::<SortKey>(), Ok(SortKey::Progress));
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Missing.to_string(), "missing");
    }
}
