//! Persisted session state: a tiny key/value store the login surface writes
//! and the booking flow reads at startup.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};
use shared::domain::UserId;

/// Well-known key holding the logged-in user identifier.
pub const SESSION_USER_KEY: &str = "userId";

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads the session user. Empty values count as logged out.
pub fn session_user(store: &dyn SessionStore) -> Result<Option<UserId>> {
    Ok(store
        .get(SESSION_USER_KEY)?
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(UserId))
}

pub fn default_session_path() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?;
    Ok(base.join("roombook").join("session.json"))
}

/// JSON object on disk, rewritten in full on every change.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read session file '{}'", self.path.display())
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("malformed session file '{}'", self.path.display()))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory '{}'", parent.display())
            })?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file '{}'", self.path.display()))
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        f()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|| Ok(self.read_all()?.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_lock(|| {
            let mut entries = self.read_all()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_lock(|| {
            let mut entries = self.read_all()?;
            if entries.remove(key).is_some() {
                self.write_all(&entries)?;
            }
            Ok(())
        })
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn with_user(user_id: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(SESSION_USER_KEY.to_string(), user_id.into());
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
