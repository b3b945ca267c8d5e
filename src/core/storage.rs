//! Key-value storage for the little session state that outlives a process.
//!
//! The API client and the authentication context never reach for a global
//! store; they are handed an [`SessionStorage`] implementation instead.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Mutex;

use crate::core::keyring::KeyringAccessError;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USERNAME_KEY: &str = "username";

#[derive(Debug)]
pub enum StorageError {
    Keyring(KeyringAccessError),
    /// A previous holder of the in-memory lock panicked.
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Keyring(err) if err.is_recoverable() => {
                write!(f, "Credential store unavailable: {err}")
            }
            StorageError::Keyring(err) => write!(f, "Credential store error: {err}"),
            StorageError::Poisoned => write!(f, "Session storage lock was poisoned"),
        }
    }
}

impl StdError for StorageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StorageError::Keyring(err) => Some(err),
            StorageError::Poisoned => None,
        }
    }
}

impl From<KeyringAccessError> for StorageError {
    fn from(err: KeyringAccessError) -> Self {
        StorageError::Keyring(err)
    }
}

pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a key that is not present is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_and_removes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);

        storage.set(AUTH_TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        storage.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let storage = MemoryStorage::with_entries([(USERNAME_KEY, "admin")]);
        storage.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(storage.get(USERNAME_KEY).unwrap().as_deref(), Some("admin"));
    }
}
