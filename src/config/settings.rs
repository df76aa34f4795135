//! Settings loading from config.toml and the environment
//!
//! The settings file is optional. When it is missing the tracker runs with
//! its built-in defaults: data under `~/.material_tracker` and the three
//! standard report sources. `MATERIAL_TRACKER_DATA_DIR` overrides the data
//! directory regardless of what the file says.

use crate::config::sources::{ReportSource, default_report_sources};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "MATERIAL_TRACKER_CONFIG";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MATERIAL_TRACKER_DATA_DIR";

/// Settings file used when [`CONFIG_PATH_ENV`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Data directory used when neither the file nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "~/.material_tracker";

/// Raw shape of config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    data_dir: Option<PathBuf>,
    report_sources: Option<Vec<ReportSource>>,
}

/// Fully resolved settings, with `~/` already expanded.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding every JSON collection
    pub data_dir: PathBuf,
    /// External usage reports, in display order
    pub report_sources: Vec<ReportSource>,
}

impl Settings {
    /// Finds a report source by key.
    ///
    /// # Errors
    /// Returns `Error::UnknownReportSource` if no source has that key.
    pub fn report_source(&self, key: &str) -> Result<&ReportSource> {
        self.report_sources
            .iter()
            .find(|source| source.key == key)
            .ok_or_else(|| Error::UnknownReportSource {
                key: key.to_string(),
            })
    }
}

/// Loads settings using the process environment.
///
/// Reads the file named by `MATERIAL_TRACKER_CONFIG` (default `config.toml`),
/// applies `MATERIAL_TRACKER_DATA_DIR` and expands `~/` against `$HOME`.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed,
/// or if it defines report sources with empty or duplicate keys.
pub fn load_settings() -> Result<Settings> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let data_dir_override = std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from);
    let home = std::env::var("HOME").ok().map(PathBuf::from);

    load_settings_from(Path::new(&config_path), data_dir_override, home.as_deref())
}

/// Loads settings from an explicit file, treating a missing file as empty.
///
/// # Errors
/// See [`load_settings`].
pub fn load_settings_from(
    path: &Path,
    data_dir_override: Option<PathBuf>,
    home: Option<&Path>,
) -> Result<Settings> {
    debug!("Attempting to load settings from: {:?}", path);
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No settings file at {:?}, using defaults", path);
            String::new()
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read settings file {}: {e}", path.display()),
            });
        }
    };
    parse_settings(&contents, data_dir_override, home)
}

/// Parses settings text and resolves it into [`Settings`].
///
/// # Errors
/// Returns `Error::Config` on invalid TOML or invalid report source keys.
pub fn parse_settings(
    contents: &str,
    data_dir_override: Option<PathBuf>,
    home: Option<&Path>,
) -> Result<Settings> {
    let file: SettingsFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })?;

    let data_dir = data_dir_override
        .or(file.data_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let mut report_sources = file.report_sources.unwrap_or_else(default_report_sources);
    let mut seen = HashSet::new();
    for source in &mut report_sources {
        if source.key.trim().is_empty() {
            return Err(Error::Config {
                message: "Report source key cannot be empty".to_string(),
            });
        }
        if !seen.insert(source.key.clone()) {
            return Err(Error::Config {
                message: format!("Report source '{}' is defined twice", source.key),
            });
        }
        source.path = expand_home(&source.path, home);
    }

    Ok(Settings {
        data_dir: expand_home(&data_dir, home),
        report_sources,
    })
}

/// Expands a leading `~` component against the home directory.
///
/// Paths without `~`, or with no known home directory, are returned as-is.
#[must_use]
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
