//! File-backed implementation of the key-value slot.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::BooksError;

use super::{KeyValueStore, Result};

const DEFAULT_DIR_NAME: &str = ".obra_core";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.obra_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("OBRA_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Stores each key as `<dir>/<key>.json`, written atomically by staging to a
/// temporary file first.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(app_data_dir);
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", canonical_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        let tmp = path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| {
            BooksError::Storage(format!("cannot create `{}`: {}", path.display(), err))
        })?;
    }
    Ok(())
}

/// Keys become file stems; anything outside a conservative character set is
/// flattened to underscores.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
    }
}
