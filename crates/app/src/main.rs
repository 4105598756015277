use clap::Parser;
use engine::{JsonFileStore, LoadOutcome, Tracker};

use crate::{cli::Cli, error::Result, settings::Settings};

mod cli;
mod display;
mod error;
mod render;
mod settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        settings.store_path = store;
    }
    if let Some(level) = cli.level {
        settings.level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "stacktrack={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let store = JsonFileStore::new(&settings.store_path);
    let mut tracker = Tracker::builder().store(store).build();
    if let LoadOutcome::Recovered(reason) = tracker.load_outcome() {
        eprintln!("Saved data could not be read ({reason}); starting with an empty ledger.");
    }

    cli::run(cli.command, &mut tracker, &settings)
}
