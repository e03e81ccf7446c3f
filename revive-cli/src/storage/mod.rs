// Session store backed by the sled embedded database.
// Holds at most one member identity and one admin identity, each as a JSON document.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Db, Tree};
use std::path::Path;

const SESSION_TREE: &str = "session";

/// Key of the signed-in member record
pub const MEMBER_KEY: &str = "member";

/// Key of the admin session record
pub const ADMIN_KEY: &str = "adminAuth";

/// Result of reading a typed record
#[derive(Debug, PartialEq)]
pub enum Stored<T> {
    Missing,
    /// Present but not decodable; carries the decoder's complaint
    Corrupt(String),
    Found(T),
}

impl<T> Stored<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Stored::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Process-wide key-value area for login identities
#[derive(Clone)]
pub struct SessionStore {
    db: Db,
    tree: Tree,
}

impl SessionStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening session store at {:?}", path);

        let db = sled::open(path).context("Failed to open session store")?;
        Self::from_db(db)
    }

    /// Store that lives only as long as the process
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .context("Failed to open temporary session store")?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self> {
        let tree = db
            .open_tree(SESSION_TREE)
            .context("Failed to open session tree")?;
        Ok(Self { db, tree })
    }

    /// Raw bytes under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .tree
            .get(key.as_bytes())
            .context("Failed to read session record")?;
        Ok(value.map(|v| v.to_vec()))
    }

    pub fn put_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        self.tree
            .insert(key.as_bytes(), value)
            .context("Failed to write session record")?;
        self.db.flush().context("Failed to flush session store")?;

        tracing::debug!("Stored session record {}", key);
        Ok(())
    }

    /// Serialize `value` as JSON under `key`
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).context("Failed to serialize session record")?;
        self.put_raw(key, &bytes)
    }

    /// Read and decode the JSON record under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Stored<T>> {
        let Some(bytes) = self.get_raw(key)? else {
            return Ok(Stored::Missing);
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Stored::Found(value)),
            Err(e) => Ok(Stored::Corrupt(e.to_string())),
        }
    }

    /// Remove `key`; returns whether anything was there
    pub fn remove(&self, key: &str) -> Result<bool> {
        let removed = self
            .tree
            .remove(key.as_bytes())
            .context("Failed to remove session record")?
            .is_some();

        if removed {
            self.db.flush().context("Failed to flush session store")?;
            tracing::debug!("Removed session record {}", key);
        }

        Ok(removed)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        self.tree
            .contains_key(key.as_bytes())
            .context("Failed to read session record")
    }
}
