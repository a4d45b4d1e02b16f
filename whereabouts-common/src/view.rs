//! What the location screen displays, as plain data
use crate::{
    locations::{Fix, SavedLocation},
    screen::{Notice, SaveStatus, ScreenError, ScreenState},
};

/// Shown where the map goes until a fix arrives.
pub const WAITING: &str = "Waiting...";

/// Shown where the map goes if permission was refused.
pub const PERMISSION_DENIED: &str = "Permission to access location was denied";

/// Label for the save button.
pub const SAVE_LABEL: &str = "Save location";

/// Label for the save button while a save is in flight.
pub const SAVING_LABEL: &str = "Saving...";

/// Label for the button that asks for a new fix.
pub const REFRESH_LABEL: &str = "Refresh location";

/// Heading above the list.
pub const LIST_TITLE: &str = "Saved locations:";

/// Shown instead of the list when it is empty.
pub const NO_SAVED_LOCATIONS: &str = "No saved locations yet.";

/// Acknowledgment after a successful save.
pub const SAVED_NOTICE: &str = "Location saved successfully";

/// Notice after a failed save.
pub const SAVE_FAILED_NOTICE: &str = "Could not save location";

/// The top half of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum MapRegion {
    /// A map centered on the fix, with a marker.
    Map(Fix),

    /// Text instead of a map.
    Message(&'static str),
}

/// One saved location, one line per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// `Latitude: ...`
    pub latitude: String,
    /// `Longitude: ...`
    pub longitude: String,
    /// `Street: ...`
    pub street: String,
    /// `Postal code: ...`
    pub postal_code: String,
}

impl Row {
    fn new(location: &SavedLocation) -> Self {
        Row {
            latitude: format!("Latitude: {}", location.latitude),
            longitude: format!("Longitude: {}", location.longitude),
            street: format!("Street: {}", location.street),
            postal_code: format!("Postal code: {}", location.postal_code),
        }
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> [&str; 4] {
        [
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.street.as_str(),
            self.postal_code.as_str(),
        ]
    }
}

/// The whole screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    /// Map or placeholder text.
    pub map: MapRegion,
    /// Text on the save button, which is always enabled.
    pub save_label: &'static str,
    /// One row per saved location, in insertion order.
    pub rows: Vec<Row>,
    /// Set when `rows` is empty.
    pub empty_message: Option<&'static str>,
    /// Transient notice, if any.
    pub notice: Option<&'static str>,
}

/// Render `state`.
#[must_use]
pub fn render(state: &ScreenState) -> ScreenView {
    let map = match (state.error(), state.fix()) {
        (Some(ScreenError::PermissionDenied), _) => MapRegion::Message(PERMISSION_DENIED),
        (None, Some(fix)) => MapRegion::Map(fix),
        (None, None) => MapRegion::Message(WAITING),
    };

    let save_label = match state.save_status() {
        SaveStatus::Idle => SAVE_LABEL,
        SaveStatus::Saving => SAVING_LABEL,
    };

    let rows: Vec<Row> = state.saved().iter().map(Row::new).collect();
    let empty_message = rows.is_empty().then_some(NO_SAVED_LOCATIONS);

    let notice = state.notice().map(|notice| match notice {
        Notice::Saved => SAVED_NOTICE,
        Notice::SaveFailed => SAVE_FAILED_NOTICE,
    });

    ScreenView {
        map,
        save_label,
        rows,
        empty_message,
        notice,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        effects::SaveError,
        locations::SavedLocations,
        persistence,
        platform::{FixError, StoreError},
        screen::Msg,
    };

    fn record(latitude: f64, street: &str) -> SavedLocation {
        SavedLocation {
            latitude,
            longitude: -122.0,
            street: street.into(),
            postal_code: "90210".into(),
        }
    }

    #[test]
    fn test_waiting_before_fix() {
        let view = render(&ScreenState::new());
        assert_eq!(view.map, MapRegion::Message(WAITING));
        assert_eq!(view.save_label, SAVE_LABEL);
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some(NO_SAVED_LOCATIONS));
        assert_eq!(view.notice, None);
    }

    #[test]
    fn test_map_when_fixed() {
        let mut state = ScreenState::new();
        state.update(Msg::FixResult(Ok(Fix::new(37.0, -122.0))));
        assert_eq!(render(&state).map, MapRegion::Map(Fix::new(37.0, -122.0)));
    }

    #[test]
    fn test_permission_denied_text() {
        let mut state = ScreenState::new();
        state.update(Msg::FixResult(Err(FixError::PermissionDenied)));
        assert_eq!(render(&state).map, MapRegion::Message(PERMISSION_DENIED));
    }

    #[test]
    fn test_rows_in_order() {
        let mut state = ScreenState::new();
        let saved: SavedLocations = vec![record(1.0, "First"), record(2.5, "Second")].into();
        state.update(Msg::LoadResult(Ok(saved)));

        let view = render(&state);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(
            view.rows[0].lines(),
            ["Latitude: 1", "Longitude: -122", "Street: First", "Postal code: 90210"]
        );
        assert_eq!(view.rows[1].latitude, "Latitude: 2.5");
        assert_eq!(view.rows[1].street, "Street: Second");
    }

    #[test]
    fn test_saving_label_and_notice() {
        let mut state = ScreenState::new();
        state.update(Msg::FixResult(Ok(Fix::new(1.0, 1.0))));
        state.update(Msg::Save);
        assert_eq!(render(&state).save_label, SAVING_LABEL);

        state.update(Msg::SaveResult(Ok(vec![record(1.0, "x")].into())));
        let view = render(&state);
        assert_eq!(view.save_label, SAVE_LABEL);
        assert_eq!(view.notice, Some(SAVED_NOTICE));
    }

    #[test]
    fn test_failed_save_notice_hides_reason() {
        let mut state = ScreenState::new();
        state.update(Msg::FixResult(Ok(Fix::new(1.0, 1.0))));
        state.update(Msg::Save);
        state.update(Msg::SaveResult(Err(SaveError::Persist(
            persistence::Error::Store(StoreError::Write {
                key: "savedLocations".into(),
                message: "quota exceeded".into(),
            }),
        ))));

        let view = render(&state);
        assert_eq!(view.notice, Some(SAVE_FAILED_NOTICE));
        assert_eq!(view.save_label, SAVE_LABEL);
    }
}
