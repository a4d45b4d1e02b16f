//! Save the list of saved locations to a key value store
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    locations::SavedLocations,
    platform::{KeyValueStore, StoreError},
};

/// The key the saved locations list lives under.
pub const SAVED_LOCATIONS_KEY: &str = "savedLocations";

/// Errors that can occur when loading or saving the list.
#[derive(Error, Debug)]
pub enum Error {
    /// The store itself failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An error occurred while serializing or deserializing JSON.
    #[error("JSON error key {0}: {1}")]
    Json(String, serde_json::Error),
}

/// The result of a load, logging any error and treating it as an empty list.
///
/// Unreadable data is not repaired here; it gets replaced by the next successful save.
#[must_use]
pub fn or_empty(loaded: Result<SavedLocations, Error>) -> SavedLocations {
    loaded.unwrap_or_else(|err| {
        error!("Error loading saved locations: {err}");
        SavedLocations::empty()
    })
}

/// Loads and saves the saved locations list under one fixed key.
pub struct SavedLocationsStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SavedLocationsStore<S> {
    /// Use `store` with the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, SAVED_LOCATIONS_KEY)
    }

    /// Use `store` with a different key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        SavedLocationsStore {
            store,
            key: key.into(),
        }
    }

    /// Load the list. A key that was never written is an empty list.
    ///
    /// # Errors
    ///
    /// This function will return an error if the store cannot be read or if the value
    /// cannot be deserialized from JSON.
    pub fn load(&self) -> Result<SavedLocations, Error> {
        match self.store.get(&self.key)? {
            Some(json) => self.decode(&json),
            None => Ok(SavedLocations::empty()),
        }
    }

    /// Save the full list, replacing what was stored before.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value cannot be serialized to JSON or if the
    /// store cannot be written.
    pub fn save(&self, locations: &SavedLocations) -> Result<(), Error> {
        let json =
            serde_json::to_string(locations).map_err(|e| Error::Json(self.key.clone(), e))?;
        self.store.set(&self.key, &json)?;
        debug!("Saved {} locations to {}", locations.len(), self.key);
        Ok(())
    }

    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, Error> {
        serde_json::from_str(json).map_err(|e| Error::Json(self.key.clone(), e))
    }
}
