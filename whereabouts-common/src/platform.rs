//! Interfaces to the device services the location screen depends on
use std::{cell::RefCell, collections::HashMap};

use thiserror::Error;

use crate::{
    geocode::{Address, GeocodeError},
    locations::Fix,
};

/// Outcome of asking for foreground location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Access granted.
    Granted,

    /// Access refused.
    Denied,
}

/// Grants or denies foreground location access.
pub trait PermissionProvider {
    /// Ask for foreground location access.
    async fn request_foreground_location(&self) -> Permission;
}

/// Reasons a position fix could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    /// The user or the browser refused access while fetching the fix.
    #[error("permission to access location was denied")]
    PermissionDenied,

    /// The provider could not determine a position.
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// The provider did not answer in time.
    #[error("timed out waiting for position")]
    Timeout,
}

/// Produces a single position fix.
pub trait Geolocator {
    /// Get the current position.
    async fn current_fix(&self) -> Result<Fix, FixError>;
}

/// Resolves coordinates to candidate addresses.
pub trait ReverseGeocoder {
    /// Look up addresses near `fix`. An empty result is not an error.
    async fn reverse_geocode(&self, fix: Fix) -> Result<Vec<Address>, GeocodeError>;
}

impl<T: PermissionProvider + ?Sized> PermissionProvider for &T {
    async fn request_foreground_location(&self) -> Permission {
        (**self).request_foreground_location().await
    }
}

impl<T: Geolocator + ?Sized> Geolocator for &T {
    async fn current_fix(&self) -> Result<Fix, FixError> {
        (**self).current_fix().await
    }
}

impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for &T {
    async fn reverse_geocode(&self, fix: Fix) -> Result<Vec<Address>, GeocodeError> {
        (**self).reverse_geocode(fix).await
    }
}

/// Errors from a key value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading a key failed.
    #[error("error reading {key}: {message}")]
    Read {
        /// The key being read.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// Writing a key failed.
    #[error("error writing {key}: {message}")]
    Write {
        /// The key being written.
        key: String,
        /// What went wrong.
        message: String,
    },
}

/// String keyed storage of string values.
pub trait KeyValueStore {
    /// Get the value for `key`, `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// A store that only lives as long as the process.
///
/// Used when no durable storage is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
