//! Domain events emitted when volunteers register.
//!
//! Events are transport agnostic; outbound publishers decide how to frame
//! them on the wire. The serialised form uses snake_case keys so downstream
//! consumers can decode it without knowing about Rust types.

use serde::{Deserialize, Serialize};

use crate::domain::{Volunteer, VolunteerId};

/// Event type tag carried by every registration event.
pub const VOLUNTEER_REGISTERED: &str = "VOLUNTEER_REGISTERED";

/// Notification that a new volunteer has been persisted.
///
/// `timestamp` is read from the service clock when the publish is attempted,
/// in whole seconds since the Unix epoch. It can trail `created_at`.
///
/// # Examples
/// ```
/// use volunteer_service::domain::{VolunteerRegisteredEvent, VOLUNTEER_REGISTERED};
///
/// let json = serde_json::json!({
///     "volunteer_id": 1,
///     "name": "Jane",
///     "phone": "0711000111",
///     "email": null,
///     "ward": "Kibra",
///     "interest": "Health",
///     "timestamp": 1_700_000_000,
///     "event_type": VOLUNTEER_REGISTERED,
/// });
/// let event: VolunteerRegisteredEvent = serde_json::from_value(json).expect("valid event");
/// assert_eq!(event.volunteer_id.get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerRegisteredEvent {
    pub volunteer_id: VolunteerId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub ward: String,
    pub interest: Option<String>,
    pub timestamp: i64,
    pub event_type: String,
}

impl VolunteerRegisteredEvent {
    /// Build the event for a freshly persisted volunteer.
    #[must_use]
    pub fn for_volunteer(volunteer: &Volunteer, timestamp: i64) -> Self {
        Self {
            volunteer_id: volunteer.id,
            name: volunteer.name.clone(),
            phone: volunteer.phone.as_str().to_owned(),
            email: volunteer.email.clone(),
            ward: volunteer.ward.as_str().to_owned(),
            interest: volunteer.interest.clone(),
            timestamp,
            event_type: VOLUNTEER_REGISTERED.to_owned(),
        }
    }

    /// Partition key: the decimal volunteer id.
    #[must_use]
    pub fn key(&self) -> String {
        self.volunteer_id.to_string()
    }
}
