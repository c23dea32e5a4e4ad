//! Application state for the calendar API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::{CalendarError, CalendarResult};
use crate::models::OrganizationCalendar;

/// Shared application state.
///
/// Holds one immutable calendar snapshot per organization. Handlers look the
/// snapshot up by the organization id each request names explicitly.
#[derive(Clone)]
pub struct AppState {
    /// Calendar snapshots keyed by organization id.
    calendars: Arc<HashMap<String, OrganizationCalendar>>,
}

impl AppState {
    /// Creates application state from calendar snapshots.
    pub fn new(calendars: impl IntoIterator<Item = OrganizationCalendar>) -> Self {
        let calendars = calendars
            .into_iter()
            .map(|calendar| (calendar.id().to_string(), calendar))
            .collect();
        Self {
            calendars: Arc::new(calendars),
        }
    }

    /// Creates application state from loaded configurations.
    pub fn from_loaders(loaders: impl IntoIterator<Item = ConfigLoader>) -> Self {
        Self::new(loaders.into_iter().map(ConfigLoader::into_calendar))
    }

    /// Returns the snapshot of an organization.
    pub fn calendar(&self, organization_id: &str) -> CalendarResult<&OrganizationCalendar> {
        self.calendars
            .get(organization_id)
            .ok_or_else(|| CalendarError::OrganizationNotFound {
                organization_id: organization_id.to_string(),
            })
    }

    /// Returns the number of loaded organizations.
    pub fn organization_count(&self) -> usize {
        self.calendars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;

    fn empty_calendar(id: &str) -> OrganizationCalendar {
        OrganizationCalendar::new(
            Organization {
                id: id.to_string(),
                name: format!("{} school", id),
            },
            vec![],
            vec![],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_calendar_lookup_by_id() {
        let state = AppState::new([empty_calendar("org-a"), empty_calendar("org-b")]);
        assert_eq!(state.organization_count(), 2);
        assert_eq!(state.calendar("org-b").unwrap().id(), "org-b");
    }

    #[test]
    fn test_unknown_organization() {
        let state = AppState::new([empty_calendar("org-a")]);
        match state.calendar("org-z") {
            Err(CalendarError::OrganizationNotFound { organization_id }) => {
                assert_eq!(organization_id, "org-z");
            }
            other => panic!("Expected OrganizationNotFound, got {:?}", other.map(|c| c.id())),
        }
    }
}
