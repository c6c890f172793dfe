//! Data and configuration loading for the ronda CLI.

use anyhow::{Context, Result};
use polars::prelude::*;
use ronda::{EngineConfig, InMemoryStore, SeriesFrame};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a default engine configuration file.
pub(crate) const CONFIG_ENV: &str = "RONDA_CONFIG";

/// Load a store snapshot from a long-format CSV file.
///
/// The file must carry `holding`, `field`, `period` and `value` columns; an
/// empty `value` cell marks an absent figure.
pub(crate) fn load_store(path: &Path) -> Result<InMemoryStore> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let frame = SeriesFrame::new(df);
    let store = frame.to_store()?;
    info!(
        path = %path.display(),
        rows = frame.len(),
        values = store.len(),
        "Loaded snapshot"
    );
    Ok(store)
}

/// Resolve and load the engine configuration.
///
/// An explicit path wins over `$RONDA_CONFIG`; with neither, the defaults are
/// used. Fields missing from the file keep their defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: EngineConfig = serde_json::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            info!(path = %path.display(), "Loaded engine configuration");
            config
        }
        None => EngineConfig::default(),
    };

    config.validate()?;
    Ok(config)
}
