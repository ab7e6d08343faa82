use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Error, Result};

/// Auth tokens keyed by API host, persisted apart from the configuration.
pub struct CredentialStore {
    path: PathBuf,
    tokens: BTreeMap<String, String>,
}

impl CredentialStore {
    pub fn load_default() -> Result<Self> {
        Self::load_from(default_path()?)
    }

    /// A missing file is an empty store.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let tokens = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, tokens })
    }

    pub fn token_for(&self, host: &str) -> Option<&str> {
        self.tokens.get(host).map(String::as_str)
    }

    pub fn require_token(&self, host: &str) -> Result<&str> {
        self.token_for(host).ok_or(Error::TokenMissing)
    }

    pub fn set_token(&mut self, host: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(host.into(), token.into());
    }

    pub fn save(&self) -> Result<()> {
        super::config::write_atomically(&self.path, &serde_json::to_string_pretty(&self.tokens)?)?;
        restrict_permissions(&self.path)
    }
}

fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "money-cli").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no home directory",
        ))
    })?;
    Ok(dirs.config_dir().join("credentials.json"))
}

// Tokens are secrets: owner read/write only.
#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::load_from(dir.path().join("credentials.json")).unwrap()
    }

    #[test]
    fn set_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_token("lvh.me:5000", "secret-token");
        store.save().unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.token_for("lvh.me:5000"), Some("secret-token"));
    }

    #[test]
    fn require_token_fails_when_the_host_has_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let error = store.require_token("lvh.me:5000").unwrap_err();
        assert_eq!(error.to_string(), "No auth token available");
    }

    #[test]
    fn tokens_are_scoped_by_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_token("one.example.com", "token-one");
        store.set_token("two.example.com", "token-two");
        assert_eq!(store.token_for("one.example.com"), Some("token-one"));
        assert_eq!(store.token_for("two.example.com"), Some("token-two"));
        assert_eq!(store.token_for("three.example.com"), None);
    }

    #[cfg(unix)]
    #[test]
    fn the_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_token("lvh.me:5000", "secret-token");
        store.save().unwrap();

        let mode = fs::metadata(dir.path().join("credentials.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
