//! Storage
//!
//! Durable client-side key-value storage. The cart and the session both keep
//! their state here as JSON strings under fixed keys, in the same way a browser
//! keeps them in `localStorage`.

use std::{fmt::Debug, io, path::PathBuf, sync::Arc};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the serialized cart snapshot.
pub const CART_KEY: &str = "rageMusicCart";

/// Key holding the signed-in user.
pub const USER_KEY: &str = "user";

/// Key holding the bearer token of the signed-in user.
pub const TOKEN_KEY: &str = "token";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {path}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,

        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The key cannot be used as a storage entry name.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Key-value string storage.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single store can be shared between the cart and the session.
pub trait Storage: Debug {
    /// Read the value under `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}
