//! JSON file helpers for the store.
//!
//! Reads never fail: a missing or corrupt file yields the caller's default.
//! A corrupt file is copied to `<name>.json.bak` first, so the next save
//! cannot destroy the only copy of its contents.
//! Writes replace the whole file by writing a sibling temporary file and
//! renaming it over the target.

use crate::errors::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Loads a JSON document, falling back to `T::default()`.
pub fn load_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!("No readable data file at {:?} ({}), starting empty", path, e);
            return T::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            let backup = path.with_extension("json.bak");
            match fs::copy(path, &backup) {
                Ok(_) => warn!(
                    "Ignoring corrupt data file {:?}: {} (saved a copy to {:?})",
                    path, e, backup
                ),
                Err(copy_err) => warn!(
                    "Ignoring corrupt data file {:?}: {} (backup to {:?} failed: {})",
                    path, e, backup, copy_err
                ),
            }
            T::default()
        }
    }
}

/// Writes `value` as pretty-printed UTF-8 JSON, replacing the whole file.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_json<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let content = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    debug!("Saved {:?}", path);
    Ok(())
}
