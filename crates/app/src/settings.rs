//! Layered settings: defaults, then an optional TOML file, then
//! `STACKTRACK_*` environment variables. Command-line flags are applied on
//! top by the caller.
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/stacktrack.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding the ledger.
    pub store_path: String,
    /// Log level for the `stacktrack` and `engine` targets.
    pub level: String,
    /// Where `export` writes when no output path is given.
    pub export_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: "config/litematica_items.json".to_string(),
            level: "info".to_string(),
            export_dir: ".".to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("STACKTRACK"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
