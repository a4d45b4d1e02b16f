//! Run the effects requested by the screen state machine
use tap::Pipe;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    geocode::{GeocodeError, ResolvedAddress},
    locations::{Fix, SavedLocation, SavedLocations},
    persistence::{self, SavedLocationsStore},
    platform::{FixError, Geolocator, KeyValueStore, Permission, PermissionProvider, ReverseGeocoder},
    screen::{Effect, Msg, ScreenState},
};

/// Reasons a save did not happen.
#[derive(Error, Debug)]
pub enum SaveError {
    /// The reverse geocoder failed outright.
    #[error("{0}")]
    Geocode(#[from] GeocodeError),

    /// The list could not be persisted.
    #[error("{0}")]
    Persist(#[from] persistence::Error),
}

/// The device services the screen talks to.
pub struct Platform<P, G, R, S: KeyValueStore> {
    permissions: P,
    geolocator: G,
    geocoder: R,
    store: SavedLocationsStore<S>,
}

impl<P, G, R, S> Platform<P, G, R, S>
where
    P: PermissionProvider,
    G: Geolocator,
    R: ReverseGeocoder,
    S: KeyValueStore,
{
    /// Bundle the services together.
    pub const fn new(
        permissions: P,
        geolocator: G,
        geocoder: R,
        store: SavedLocationsStore<S>,
    ) -> Self {
        Platform {
            permissions,
            geolocator,
            geocoder,
            store,
        }
    }

    /// Ask for permission and, only if granted, fetch one fix.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::PermissionDenied`] without touching the geolocator if permission
    /// is refused, otherwise whatever the geolocator fails with.
    pub async fn acquire_fix(&self) -> Result<Fix, FixError> {
        match self.permissions.request_foreground_location().await {
            Permission::Denied => Err(FixError::PermissionDenied),
            Permission::Granted => {
                debug!("Permission granted, getting position");
                self.geolocator.current_fix().await
            }
        }
    }

    /// Load the persisted list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds something that is not a list.
    pub fn load_saved(&self) -> Result<SavedLocations, persistence::Error> {
        self.store.load()
    }

    /// Reverse geocode `fix`, append it to the persisted list and save.
    ///
    /// The list is re-read before appending so the result always matches what is stored.
    /// If it cannot be read, `base` is used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the geocoder fails or the list cannot be written. Nothing is
    /// written in the first case.
    pub async fn save_location(
        &self,
        fix: Fix,
        base: SavedLocations,
    ) -> Result<SavedLocations, SaveError> {
        let address = self
            .geocoder
            .reverse_geocode(fix)
            .await?
            .pipe(|candidates| ResolvedAddress::from_candidates(&candidates));
        debug!("Resolved {fix:?} to {address:?}");

        let current = self.store.load().unwrap_or_else(|err| {
            warn!("Could not re-read saved locations, using in-memory list: {err}");
            base
        });

        let updated = current.appended(SavedLocation::new(fix, address));
        self.store.save(&updated)?;
        Ok(updated)
    }

    /// Run one effect, returning the message carrying its result.
    pub async fn perform(&self, effect: Effect) -> Msg {
        match effect {
            Effect::AcquireFix => self.acquire_fix().await.pipe(Msg::FixResult),
            Effect::LoadSaved => self.load_saved().pipe(Msg::LoadResult),
            Effect::SaveLocation { fix, base } => {
                self.save_location(fix, base).await.pipe(Msg::SaveResult)
            }
        }
    }

    /// Apply `msg` to `state` and run every resulting effect to completion, one at a time.
    pub async fn dispatch(&self, state: &mut ScreenState, msg: Msg) {
        let mut pending = state.update(msg);
        while !pending.is_empty() {
            let effect = pending.remove(0);
            info!("Running {effect:?}");
            let result = self.perform(effect).await;
            pending.extend(state.update(result));
        }
    }
}
