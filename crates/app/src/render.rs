//! Plain-text output for the terminal.
use engine::{LedgerEntry, ShoppingList, Stats};

use crate::display;

const SHORT_ID: usize = 8;

fn short_id(entry: &LedgerEntry) -> String {
    entry.id().to_string().chars().take(SHORT_ID).collect()
}

pub fn entry_line(entry: &LedgerEntry) {
    let mark = if entry.is_complete() { "x" } else { " " };
    println!(
        "[{mark}] {id}  {name:<28} {held:>6}/{required:<6} {held_stacks:>9} / {required_stacks:<9} {percent:>5.1}%  {color}  {texture}",
        id = short_id(entry),
        name = entry.name(),
        held = entry.held(),
        required = entry.required(),
        held_stacks = entry.held_stacks().to_string(),
        required_stacks = entry.required_stacks().to_string(),
        percent = entry.percent(),
        color = display::fallback_color(entry.name()),
        texture = display::texture_key(entry.name()),
    );
}

/// Entry line followed by its icon, for a single changed material.
pub fn entry_detail(entry: &LedgerEntry) {
    entry_line(entry);
    println!("    icon: {}", display::icon_url(entry.name()));
}

pub fn entries(entries: &[&LedgerEntry]) {
    if entries.is_empty() {
        println!("No materials to show.");
        return;
    }
    for entry in entries {
        entry_line(entry);
    }
}

pub fn stats(stats: &Stats) {
    println!(
        "Needed:    {:>8} ({})",
        stats.total_needed,
        stats.needed_stacks()
    );
    println!(
        "Collected: {:>8} ({})",
        stats.total_collected,
        stats.collected_stacks()
    );
    println!(
        "Missing:   {:>8} ({})",
        stats.total_missing,
        stats.missing_stacks()
    );
    println!(
        "Progress:  {:>7.1}%  {}/{} items complete",
        stats.overall_progress(),
        stats.completed_items,
        stats.item_count
    );
}

pub fn shopping_list(list: &ShoppingList<'_>) {
    if list.is_empty() {
        println!("All materials collected!");
        return;
    }
    for item in &list.items {
        println!(
            "[ ] {name:<28} {missing:>6}  ({stacks})",
            name = item.entry.name(),
            missing = item.missing,
            stacks = item.missing_stacks(),
        );
    }
    println!();
    println!(
        "Total items needed: {} ({})",
        list.total_missing, list.total_missing_stacks
    );
}
