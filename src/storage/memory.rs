//! In-memory storage

use std::{collections::HashMap, sync::RwLock};

use super::{Storage, StorageError};

/// Storage held entirely in memory. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_err| StorageError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_err| StorageError::Poisoned)?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_err| StorageError::Poisoned)?;

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_key_reads_as_none() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn put_then_get() -> TestResult {
        let storage = MemoryStorage::new();

        storage.put("cart", "[]")?;
        storage.put("cart", "[1]")?;

        assert_eq!(storage.get("cart")?.as_deref(), Some("[1]"));

        Ok(())
    }

    #[test]
    fn delete_is_idempotent() -> TestResult {
        let storage = MemoryStorage::with_entries([("token", "abc")]);

        storage.delete("token")?;
        storage.delete("token")?;

        assert_eq!(storage.get("token")?, None);

        Ok(())
    }
}
