#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    sync::Once,
};

use whereabouts_common::{
    geocode::{Address, GeocodeError},
    locations::Fix,
    platform::{
        FixError, Geolocator, KeyValueStore, MemoryStore, Permission, PermissionProvider,
        ReverseGeocoder, StoreError,
    },
};

static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub struct FakePermissions {
    answer: Permission,
    pub requests: Cell<usize>,
}

impl FakePermissions {
    pub const fn new(answer: Permission) -> Self {
        Self {
            answer,
            requests: Cell::new(0),
        }
    }
}

impl PermissionProvider for FakePermissions {
    async fn request_foreground_location(&self) -> Permission {
        self.requests.set(self.requests.get() + 1);
        self.answer
    }
}

/// Answers with each result in turn, repeating the last one.
pub struct FakeGeolocator {
    results: RefCell<Vec<Result<Fix, FixError>>>,
    pub calls: Cell<usize>,
}

impl FakeGeolocator {
    pub fn new(result: Result<Fix, FixError>) -> Self {
        Self::sequence(vec![result])
    }

    pub fn sequence(results: Vec<Result<Fix, FixError>>) -> Self {
        Self {
            results: RefCell::new(results),
            calls: Cell::new(0),
        }
    }
}

impl Geolocator for FakeGeolocator {
    async fn current_fix(&self) -> Result<Fix, FixError> {
        self.calls.set(self.calls.get() + 1);
        let mut results = self.results.borrow_mut();
        if results.len() > 1 {
            results.remove(0)
        } else {
            results[0].clone()
        }
    }
}

pub struct FakeGeocoder {
    result: Result<Vec<Address>, GeocodeError>,
    pub calls: Cell<usize>,
}

impl FakeGeocoder {
    pub const fn new(result: Result<Vec<Address>, GeocodeError>) -> Self {
        Self {
            result,
            calls: Cell::new(0),
        }
    }

    pub fn resolving(street: &str, postal_code: &str) -> Self {
        Self::new(Ok(vec![Address {
            street: Some(street.to_string()),
            postal_code: Some(postal_code.to_string()),
        }]))
    }
}

impl ReverseGeocoder for FakeGeocoder {
    async fn reverse_geocode(&self, _fix: Fix) -> Result<Vec<Address>, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

/// A memory store whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.set(key, value)
    }
}
