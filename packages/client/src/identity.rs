//! Viewer identity persisted across sessions.
//!
//! The file is a JSON object holding the identity under a fixed storage key,
//! so a returning viewer does not have to enter a display name again.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

pub const STORAGE_KEY: &str = "marionette.identity";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored identity, or `None` if the file or key is absent
    pub fn load(&self) -> Result<Option<Identity>, IdentityError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(&text)?;
        match entries.remove(STORAGE_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Write the identity, keeping any other keys already in the file
    pub fn save(&self, identity: &Identity) -> Result<(), IdentityError> {
        let mut entries: BTreeMap<String, serde_json::Value> = match fs::read_to_string(&self.path)
        {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        entries.insert(STORAGE_KEY.to_string(), serde_json::to_value(identity)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        tracing::debug!("Saved identity to {}", self.path.display());
        Ok(())
    }

    /// Resolve the name to report: an explicit name wins and is persisted,
    /// otherwise the stored one is used. Store failures are logged.
    pub fn resolve(&self, explicit: Option<String>) -> Option<String> {
        let explicit = explicit.filter(|name| !name.trim().is_empty());
        if let Some(name) = explicit {
            if let Err(e) = self.save(&Identity { name: name.clone() }) {
                tracing::warn!("Failed to persist identity: {}", e);
            }
            return Some(name);
        }
        match self.load() {
            Ok(identity) => identity.map(|identity| identity.name),
            Err(e) => {
                tracing::warn!("Ignoring stored identity: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_none() {
        // テスト項目: ファイルが無ければ None
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("identity.json"));

        // when (操作):
        let identity = store.load().unwrap();

        // then (期待する結果):
        assert_eq!(identity, None);
    }

    #[test]
    fn test_save_then_load_under_storage_key() {
        // テスト項目: 保存した名前が固定キーの下に書かれ、読み戻せる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("nested/identity.json"));

        // when (操作):
        store
            .save(&Identity {
                name: "Fox".to_string(),
            })
            .unwrap();

        // then (期待する結果):
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[STORAGE_KEY]["name"], "Fox");
        assert_eq!(store.load().unwrap().unwrap().name, "Fox");
    }

    #[test]
    fn test_save_keeps_other_keys() {
        // テスト項目: 既存の他のキーは保存時に保持される
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        fs::write(&path, r#"{"other":1}"#).unwrap();
        let store = IdentityStore::new(&path);

        // when (操作):
        store
            .save(&Identity {
                name: "Owl".to_string(),
            })
            .unwrap();

        // then (期待する結果):
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["other"], 1);
        assert_eq!(raw[STORAGE_KEY]["name"], "Owl");
    }

    #[test]
    fn test_resolve_prefers_explicit_and_persists_it() {
        // テスト項目: 明示した名前が優先され、次回以降も使われる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("identity.json"));

        // when (操作):
        let first = store.resolve(Some("Fox".to_string()));
        let returning = store.resolve(None);
        let blank = store.resolve(Some("  ".to_string()));

        // then (期待する結果):
        assert_eq!(first.as_deref(), Some("Fox"));
        assert_eq!(returning.as_deref(), Some("Fox"));
        assert_eq!(blank.as_deref(), Some("Fox"));
    }

    #[test]
    fn test_malformed_file_is_reported() {
        // テスト項目: 壊れたファイルはエラーになり、resolve では無視される
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        fs::write(&path, "not json").unwrap();
        let store = IdentityStore::new(&path);

        // when (操作):
        let loaded = store.load();

        // then (期待する結果):
        assert!(matches!(loaded, Err(IdentityError::Malformed(_))));
        assert_eq!(store.resolve(None), None);
    }
}
