//! Command-line surface. Each subcommand maps onto one tracker operation;
//! file access happens here and nowhere in the engine.
use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use engine::{
    BUNDLE_SIZE, EngineError, FilterMode, Ledger, LedgerStore, SortKey, Tracker, ViewQuery,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    render,
    settings::Settings,
};

#[derive(Debug, Parser)]
#[command(name = "stacktrack", about = "Track materials collected for a build")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the ledger file.
    #[arg(long)]
    pub store: Option<String>,
    /// Override the log level.
    #[arg(long)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the ledger with a material list (CSV with Item/Total/Available).
    Import { file: PathBuf },
    /// Show tracked materials.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = FilterMode::All)]
        filter: FilterMode,
        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,
    },
    /// Show overall progress.
    Stats,
    /// Show what is still missing, largest deficit first.
    Shopping,
    /// Set the held amount.
    Set {
        entry: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Set the number of full stacks held, keeping the partial stack.
    SetStacks {
        entry: String,
        #[arg(allow_negative_numbers = true)]
        stacks: i64,
    },
    /// Add items (one stack by default).
    Add {
        entry: String,
        #[arg(default_value_t = BUNDLE_SIZE, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Remove items (one stack by default).
    Sub {
        entry: String,
        #[arg(default_value_t = BUNDLE_SIZE, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Mark a material as fully collected.
    Complete { entry: String },
    /// Set the held amount back to zero.
    Reset { entry: String },
    /// Stop tracking a material.
    Delete { entry: String },
    /// Remove every material. Cannot be undone.
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Write the ledger as CSV (`-` for stdout).
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

const MIN_ID_PREFIX: usize = 4;

/// Finds an entry by full id, unique id prefix or unique case-insensitive name.
fn resolve(ledger: &Ledger, key: &str) -> Option<Uuid> {
    if let Ok(id) = key.parse::<Uuid>() {
        return Some(id);
    }
    let key = key.trim();
    if key.len() >= MIN_ID_PREFIX {
        let prefix = key.to_lowercase();
        let by_prefix: Vec<_> = ledger
            .iter()
            .filter(|e| e.id().to_string().starts_with(&prefix))
            .collect();
        if let [entry] = by_prefix.as_slice() {
            return Some(entry.id());
        }
    }
    let by_name: Vec<_> = ledger
        .iter()
        .filter(|e| e.name().eq_ignore_ascii_case(key))
        .collect();
    match by_name.as_slice() {
        [entry] => Some(entry.id()),
        _ => None,
    }
}

fn with_entry<S: LedgerStore>(
    tracker: &mut Tracker<S>,
    key: &str,
    op: impl FnOnce(&mut Tracker<S>, Uuid) -> std::result::Result<bool, EngineError>,
) -> Result<()> {
    let Some(id) = resolve(tracker.ledger(), key) else {
        println!("No material matches \"{key}\".");
        return Ok(());
    };
    if op(tracker, id)? {
        if let Some(entry) = tracker.ledger().get(id) {
            render::entry_detail(entry);
        }
    } else {
        println!("No material matches \"{key}\".");
    }
    Ok(())
}

pub fn run<S: LedgerStore>(
    command: Command,
    tracker: &mut Tracker<S>,
    settings: &Settings,
) -> Result<()> {
    match command {
        Command::Import { file } => {
            let payload = fs::read(&file)?;
            let report = tracker.import(payload)?;
            println!(
                "Imported {} materials from {} rows ({} skipped).",
                report.imported, report.rows, report.skipped
            );
        }
        Command::List {
            search,
            filter,
            sort,
        } => {
            let query = ViewQuery::new().search(search).filter(filter).sort(sort);
            render::entries(&tracker.view(&query));
        }
        Command::Stats => render::stats(&tracker.stats()),
        Command::Shopping => render::shopping_list(&tracker.shopping_list()),
        Command::Set { entry, amount } => {
            with_entry(tracker, &entry, |t, id| t.set_available(id, amount))?;
        }
        Command::SetStacks { entry, stacks } => {
            with_entry(tracker, &entry, |t, id| t.set_available_stacks(id, stacks))?;
        }
        Command::Add { entry, amount } => {
            with_entry(tracker, &entry, |t, id| t.increment(id, amount))?;
        }
        Command::Sub { entry, amount } => {
            with_entry(tracker, &entry, |t, id| t.decrement(id, amount))?;
        }
        Command::Complete { entry } => with_entry(tracker, &entry, |t, id| t.complete(id))?,
        Command::Reset { entry } => with_entry(tracker, &entry, |t, id| t.reset(id))?,
        Command::Delete { entry } => {
            let removed = match resolve(tracker.ledger(), &entry) {
                Some(id) => tracker.delete(id)?,
                None => None,
            };
            match removed {
                Some(removed) => println!("Deleted {}.", removed.name()),
                None => println!("No material matches \"{entry}\"."),
            }
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(AppError::Usage(
                    "clearing removes every material; pass --yes to confirm".to_string(),
                ));
            }
            tracker.clear()?;
            println!("Ledger cleared.");
        }
        Command::Export { out } => {
            let payload = tracker.export_csv()?;
            match out {
                Some(path) if path.as_os_str() == "-" => print!("{payload}"),
                Some(path) => write_export(&path, &payload)?,
                None => {
                    let name = format!(
                        "litematica-progress-{}.csv",
                        chrono::Utc::now().timestamp_millis()
                    );
                    let path = PathBuf::from(&settings.export_dir).join(name);
                    write_export(&path, &payload)?;
                }
            }
        }
    }
    Ok(())
}

fn write_export(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, payload)?;
    tracing::info!("export written to {}", path.display());
    println!("Exported to {}.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::import_payload;

    fn ledger() -> Ledger {
        import_payload("Item,Total\nOak Planks,10\nGlass,5\nglass pane,3\n")
            .unwrap()
            .ledger
    }

    #[test]
    fn resolve_by_name_ignores_case() {
        let l = ledger();
        let oak = l.entries()[0].id();
        assert_eq!(resolve(&l, "oak planks"), Some(oak));
        assert_eq!(resolve(&l, "Bedrock"), None);
    }

    #[test]
    fn resolve_by_id_and_prefix() {
        let l = ledger();
        let glass = l.entries()[1].id();
        assert_eq!(resolve(&l, &glass.to_string()), Some(glass));
        assert_eq!(resolve(&l, &glass.to_string()[..13]), Some(glass));
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["stacktrack", "list", "--filter", "incomplete"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List {
                filter: FilterMode::Incomplete,
                sort: SortKey::Name,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["stacktrack", "add", "Glass"]).unwrap();
        assert!(matches!(cli.command, Command::Add { amount: 64, .. }));
    }

    #[test]
    fn negative_amounts_reach_the_engine() {
        let cli = Cli::try_parse_from(["stacktrack", "set", "Glass", "-5"]).unwrap();
        assert!(matches!(cli.command, Command::Set { amount: -5, .. }));

        let cli = Cli::try_parse_from(["stacktrack", "set-stacks", "Glass", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::SetStacks { stacks: -1, .. }));

        let cli = Cli::try_parse_from(["stacktrack", "sub", "Glass", "-64"]).unwrap();
        assert!(matches!(cli.command, Command::Sub { amount: -64, .. }));
    }

    #[test]
    fn negative_set_clamps_to_zero() {
        let mut tracker = engine::Tracker::builder()
            .store(engine::MemoryStore::new())
            .build();
        tracker.import("Item,Total,Available\nGlass,10,4\n").unwrap();
        let cli = Cli::try_parse_from(["stacktrack", "set", "glass", "-5"]).unwrap();
        run(cli.command, &mut tracker, &Settings::default()).unwrap();
        assert_eq!(tracker.ledger().entries()[0].held(), 0);
    }
}
