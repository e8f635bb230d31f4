//! Pluggable storage strategies for persisted editor content.
//!
//! Exactly one strategy is active per autosave controller. A missing value on
//! restore is `Ok(None)`, never an error. Keys are caller-owned; a key is a
//! single-writer resource and sharing one across concurrent editors is
//! undefined behavior.

use crate::error::EditorError;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Content rows keyed by caller-supplied document key.
const DOCUMENTS: TableDefinition<&str, &str> = TableDefinition::new("documents");

/// Storage surface the autosave controller writes through.
pub trait StorageStrategy: Send {
    /// Persist `content` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the underlying medium rejects the write.
    fn save(&self, key: &str, content: &str) -> Result<(), EditorError>;

    /// Read back the last persisted content for `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing was ever saved under `key`.
    fn restore(&self, key: &str) -> Result<Option<String>, EditorError>;

    /// Remove any persisted content for `key`. Removing a missing key is not
    /// an error.
    fn clear(&self, key: &str) -> Result<(), EditorError>;
}

/// Durable keyed store backed by a single-table redb database file.
pub struct LocalStore {
    db: redb::Database,
}

impl LocalStore {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error when the parent directory cannot be created or the
    /// database file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| EditorError::Storage(err.to_string()))?;
        }
        let db = redb::Database::create(path)?;
        debug!("Opened local content store at {}", path.display());
        Ok(Self { db })
    }
}

impl StorageStrategy for LocalStore {
    fn save(&self, key: &str, content: &str) -> Result<(), EditorError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(DOCUMENTS)?;
            table.insert(key, content)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn restore(&self, key: &str) -> Result<Option<String>, EditorError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(DOCUMENTS) {
            Ok(table) => table,
            // First restore can race table creation; an absent table simply
            // means nothing was saved yet.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn clear(&self, key: &str) -> Result<(), EditorError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(DOCUMENTS)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// In-memory keyed store scoped to the process lifetime.
#[derive(Default)]
pub struct SessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageStrategy for SessionStore {
    fn save(&self, key: &str, content: &str) -> Result<(), EditorError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| EditorError::Storage("session store poisoned".to_string()))?;
        entries.insert(key.to_string(), content.to_string());
        Ok(())
    }

    fn restore(&self, key: &str) -> Result<Option<String>, EditorError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| EditorError::Storage("session store poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn clear(&self, key: &str) -> Result<(), EditorError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| EditorError::Storage("session store poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

type SaveFn = dyn Fn(&str, &str) -> Result<(), EditorError> + Send;
type RestoreFn = dyn Fn(&str) -> Result<Option<String>, EditorError> + Send;
type ClearFn = dyn Fn(&str) -> Result<(), EditorError> + Send;

/// Caller-supplied strategy for arbitrary backends (network, database, file).
pub struct CallbackStore {
    save: Box<SaveFn>,
    restore: Box<RestoreFn>,
    clear: Box<ClearFn>,
}

impl CallbackStore {
    pub fn new(
        save: impl Fn(&str, &str) -> Result<(), EditorError> + Send + 'static,
        restore: impl Fn(&str) -> Result<Option<String>, EditorError> + Send + 'static,
        clear: impl Fn(&str) -> Result<(), EditorError> + Send + 'static,
    ) -> Self {
        Self {
            save: Box::new(save),
            restore: Box::new(restore),
            clear: Box::new(clear),
        }
    }
}

impl StorageStrategy for CallbackStore {
    fn save(&self, key: &str, content: &str) -> Result<(), EditorError> {
        (self.save)(key, content)
    }

    fn restore(&self, key: &str) -> Result<Option<String>, EditorError> {
        (self.restore)(key)
    }

    fn clear(&self, key: &str) -> Result<(), EditorError> {
        (self.clear)(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn exercise_roundtrip(store: &dyn StorageStrategy) {
        assert_eq!(store.restore("doc").unwrap(), None);
        store.save("doc", "<p>draft</p>").unwrap();
        assert_eq!(store.restore("doc").unwrap().as_deref(), Some("<p>draft</p>"));
        store.save("doc", "<p>edited</p>").unwrap();
        assert_eq!(
            store.restore("doc").unwrap().as_deref(),
            Some("<p>edited</p>")
        );
        store.clear("doc").unwrap();
        assert_eq!(store.restore("doc").unwrap(), None);
        // Clearing a missing key stays silent.
        store.clear("doc").unwrap();
    }

    #[test]
    fn session_store_roundtrip() {
        exercise_roundtrip(&SessionStore::default());
    }

    #[test]
    fn local_store_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let store = LocalStore::open(dir.path().join("content.redb")).expect("store");
        exercise_roundtrip(&store);
    }

    #[test]
    fn local_store_survives_reopen() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("content.redb");
        {
            let store = LocalStore::open(&path).expect("store");
            store.save("doc", "persisted").unwrap();
        }
        let store = LocalStore::open(&path).expect("reopen");
        assert_eq!(store.restore("doc").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn keys_are_independent() {
        let store = SessionStore::default();
        store.save("a", "alpha").unwrap();
        store.save("b", "beta").unwrap();
        store.clear("a").unwrap();
        assert_eq!(store.restore("a").unwrap(), None);
        assert_eq!(store.restore("b").unwrap().as_deref(), Some("beta"));
    }

    #[test]
    fn callback_store_delegates_to_closures() {
        let written: Arc<Mutex<Vec<(String, String)>>> = Arc::default();
        let written_in = Arc::clone(&written);
        let store = CallbackStore::new(
            move |key, content| {
                written_in
                    .lock()
                    .unwrap()
                    .push((key.to_string(), content.to_string()));
                Ok(())
            },
            |_key| Ok(None),
            |_key| Ok(()),
        );
        store.save("doc", "payload").unwrap();
        assert_eq!(
            written.lock().unwrap().as_slice(),
            &[("doc".to_string(), "payload".to_string())]
        );
        assert_eq!(store.restore("doc").unwrap(), None);
    }
}
