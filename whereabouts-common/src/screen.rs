//! State machine for the location screen
//!
//! [`ScreenState::update`] consumes a [`Msg`] and returns the [`Effect`]s that must be run
//! in response. Running an effect produces another [`Msg`], which is fed back in. The state
//! never performs I/O itself, so the same machine drives the browser component and the tests.
use tracing::{debug, error, info, warn};

use crate::{
    effects::SaveError,
    locations::{Fix, SavedLocations},
    persistence,
    platform::FixError,
};

/// Input to the state machine.
#[derive(Debug)]
pub enum Msg {
    /// The screen became active.
    Mount,

    /// The user asked for a new position fix.
    Refresh,

    /// The user pressed Save.
    Save,

    /// The transient notice should go away.
    DismissNotice,

    /// Permission and fix acquisition finished.
    FixResult(Result<Fix, FixError>),

    /// Loading the saved list finished.
    LoadResult(Result<SavedLocations, persistence::Error>),

    /// A save finished. On success this is the list as now persisted.
    SaveResult(Result<SavedLocations, SaveError>),
}

/// I/O the state machine wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Request permission and, if granted, fetch one fix.
    AcquireFix,

    /// Load the persisted list.
    LoadSaved,

    /// Reverse geocode `fix`, append it to the list and persist.
    ///
    /// `base` is the in-memory list when Save was pressed.
    SaveLocation {
        /// The fix to save.
        fix: Fix,
        /// The list to append to if the persisted one cannot be read.
        base: SavedLocations,
    },
}

/// Whether a save is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Ready to save.
    #[default]
    Idle,

    /// A save is in flight, further presses are ignored.
    Saving,
}

impl SaveStatus {
    /// True if a new save may start.
    #[must_use]
    pub const fn can_save(self) -> bool {
        matches!(self, SaveStatus::Idle)
    }
}

/// Errors the user gets to see in place of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// Location access was refused.
    PermissionDenied,
}

/// A transient message shown after a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The location was saved.
    Saved,

    /// The location could not be saved. The reason is only logged.
    SaveFailed,
}

/// Everything the location screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    fix: Option<Fix>,
    error: Option<ScreenError>,
    locating: bool,
    saved: SavedLocations,
    saved_by_us: bool,
    save_status: SaveStatus,
    notice: Option<Notice>,
}

impl ScreenState {
    /// A freshly created screen, nothing known yet.
    #[must_use]
    pub fn new() -> Self {
        ScreenState::default()
    }

    /// The current fix, if one has been acquired.
    #[must_use]
    pub const fn fix(&self) -> Option<Fix> {
        self.fix
    }

    /// The error shown in place of the map, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ScreenError> {
        self.error.as_ref()
    }

    /// True while permission and fix acquisition is running.
    #[must_use]
    pub const fn is_locating(&self) -> bool {
        self.locating
    }

    /// The in-memory saved locations.
    #[must_use]
    pub const fn saved(&self) -> &SavedLocations {
        &self.saved
    }

    /// Whether a save is in flight.
    #[must_use]
    pub const fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    /// The notice to show, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply `msg` and return the effects to run.
    #[allow(clippy::cognitive_complexity)]
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Mount => {
                self.locating = true;
                vec![Effect::AcquireFix, Effect::LoadSaved]
            }
            Msg::Refresh => {
                if self.locating {
                    debug!("Already locating, ignoring refresh");
                    Vec::new()
                } else {
                    self.locating = true;
                    vec![Effect::AcquireFix]
                }
            }
            Msg::FixResult(Ok(fix)) => {
                debug!("Got fix: {fix:?}");
                self.locating = false;
                self.fix = Some(fix);
                self.error = None;
                Vec::new()
            }
            Msg::FixResult(Err(FixError::PermissionDenied)) => {
                info!("Location permission denied");
                self.locating = false;
                self.fix = None;
                self.error = Some(ScreenError::PermissionDenied);
                Vec::new()
            }
            Msg::FixResult(Err(err)) => {
                warn!("Could not get position: {err}");
                self.locating = false;
                Vec::new()
            }
            Msg::LoadResult(result) => {
                if self.saved_by_us {
                    debug!("List already replaced by a save, ignoring load");
                    return Vec::new();
                }
                self.saved = persistence::or_empty(result);
                Vec::new()
            }
            Msg::Save => match self.fix {
                Some(fix) if self.save_status.can_save() => {
                    self.save_status = SaveStatus::Saving;
                    self.notice = None;
                    vec![Effect::SaveLocation {
                        fix,
                        base: self.saved.clone(),
                    }]
                }
                Some(_) => {
                    debug!("Save already in progress, not saving");
                    Vec::new()
                }
                None => {
                    debug!("No fix yet, not saving");
                    Vec::new()
                }
            },
            Msg::SaveResult(Ok(saved)) => {
                info!("Location saved, {} total", saved.len());
                self.saved = saved;
                self.saved_by_us = true;
                self.save_status = SaveStatus::Idle;
                self.notice = Some(Notice::Saved);
                Vec::new()
            }
            Msg::SaveResult(Err(err)) => {
                error!("Error saving location: {err}");
                self.save_status = SaveStatus::Idle;
                self.notice = Some(Notice::SaveFailed);
                Vec::new()
            }
            Msg::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        geocode::GeocodeError,
        locations::SavedLocation,
        platform::StoreError,
    };

    fn record(street: &str) -> SavedLocation {
        SavedLocation {
            latitude: 1.0,
            longitude: 2.0,
            street: street.into(),
            postal_code: "1234".into(),
        }
    }

    fn with_fix() -> ScreenState {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        state.update(Msg::FixResult(Ok(Fix::new(37.0, -122.0))));
        state
    }

    #[test]
    fn test_mount_starts_both_chains() {
        let mut state = ScreenState::new();
        let effects = state.update(Msg::Mount);
        assert_eq!(effects, vec![Effect::AcquireFix, Effect::LoadSaved]);
        assert!(state.is_locating());
    }

    #[test]
    fn test_permission_denied() {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        state.update(Msg::FixResult(Err(FixError::PermissionDenied)));
        assert_eq!(state.error(), Some(&ScreenError::PermissionDenied));
        assert_eq!(state.fix(), None);
        assert!(!state.is_locating());
    }

    #[test]
    fn test_fix_failure_leaves_fix_unset() {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        state.update(Msg::FixResult(Err(FixError::Timeout)));
        assert_eq!(state.fix(), None);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_refresh_failure_keeps_previous_fix() {
        let mut state = with_fix();
        assert_eq!(state.update(Msg::Refresh), vec![Effect::AcquireFix]);
        state.update(Msg::FixResult(Err(FixError::Unavailable("no signal".into()))));
        assert_eq!(state.fix(), Some(Fix::new(37.0, -122.0)));
    }

    #[test]
    fn test_refresh_ignored_while_locating() {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        assert!(state.update(Msg::Refresh).is_empty());
    }

    #[test]
    fn test_save_without_fix_is_noop() {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        state.update(Msg::LoadResult(Ok(vec![record("a")].into())));
        let before = state.clone();

        let effects = state.update(Msg::Save);
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_second_save_rejected_while_busy() {
        let mut state = with_fix();
        let first = state.update(Msg::Save);
        assert_eq!(first.len(), 1);
        assert_eq!(state.save_status(), SaveStatus::Saving);

        let second = state.update(Msg::Save);
        assert!(second.is_empty());
    }

    #[test]
    fn test_save_success_replaces_list() {
        let mut state = with_fix();
        state.update(Msg::Save);
        let saved: SavedLocations = vec![record("a")].into();
        state.update(Msg::SaveResult(Ok(saved.clone())));

        assert_eq!(state.saved(), &saved);
        assert_eq!(state.save_status(), SaveStatus::Idle);
        assert_eq!(state.notice(), Some(&Notice::Saved));
    }

    #[test]
    fn test_save_failure_keeps_list() {
        let mut state = with_fix();
        let before: SavedLocations = vec![record("a")].into();
        state.update(Msg::LoadResult(Ok(before.clone())));
        state.update(Msg::Save);

        let err = SaveError::Persist(persistence::Error::Store(StoreError::Write {
            key: "savedLocations".into(),
            message: "quota".into(),
        }));
        state.update(Msg::SaveResult(Err(err)));

        assert_eq!(state.saved(), &before);
        assert_eq!(state.save_status(), SaveStatus::Idle);
        assert_eq!(state.notice(), Some(&Notice::SaveFailed));
        assert_eq!(state.update(Msg::Save).len(), 1);
    }

    #[test]
    fn test_geocode_failure_returns_to_idle() {
        let mut state = with_fix();
        state.update(Msg::Save);
        state.update(Msg::SaveResult(Err(SaveError::Geocode(
            GeocodeError::Request("offline".into()),
        ))));
        assert!(state.save_status().can_save());
        assert!(state.saved().is_empty());
    }

    #[test]
    fn test_load_failure_is_empty_list() {
        let mut state = ScreenState::new();
        state.update(Msg::Mount);
        let err = serde_json::from_str::<SavedLocations>("nope").unwrap_err();
        state.update(Msg::LoadResult(Err(persistence::Error::Json(
            "savedLocations".into(),
            err,
        ))));
        assert!(state.saved().is_empty());
    }

    #[test]
    fn test_late_load_does_not_clobber_save() {
        let mut state = with_fix();
        state.update(Msg::Save);
        let saved: SavedLocations = vec![record("old"), record("new")].into();
        state.update(Msg::SaveResult(Ok(saved.clone())));

        state.update(Msg::LoadResult(Ok(vec![record("old")].into())));
        assert_eq!(state.saved(), &saved);
    }

    #[test]
    fn test_dismiss_notice() {
        let mut state = with_fix();
        state.update(Msg::Save);
        state.update(Msg::SaveResult(Ok(vec![record("a")].into())));
        state.update(Msg::DismissNotice);
        assert_eq!(state.notice(), None);
    }
}
