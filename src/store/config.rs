use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;

use crate::error::{Error, Result};

/// Persisted key/value configuration (API base URI, current entity id).
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl ConfigStore {
    pub fn load_default() -> Result<Self> {
        Self::load_from(default_path()?)
    }

    /// A missing file is an empty store.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::config_missing(key))
    }

    /// Numbers and numeric strings are both accepted: `config set` writes
    /// strings while entity resolution writes numbers.
    pub fn require_i64(&self, key: &str) -> Result<i64> {
        self.get(key)
            .and_then(|value| match value {
                Value::Number(number) => number.as_i64(),
                Value::String(string) => string.parse().ok(),
                _ => None,
            })
            .ok_or_else(|| Error::config_missing(key))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn all(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn save(&self) -> Result<()> {
        write_atomically(&self.path, &serde_json::to_string_pretty(&self.values)?)
    }
}

fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "money-cli").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no home directory",
        ))
    })?;
    Ok(dirs.config_dir().join("config.json"))
}

// Write to a temporary file first, then rename over the real one, so a
// failed write can't lose the existing store.
pub(super) fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file_name = path.file_name().and_then(OsStr::to_str).unwrap_or("store");
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
