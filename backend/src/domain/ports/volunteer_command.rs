//! Driving port for volunteer write operations.
//!
//! Inbound adapters call [`VolunteerCommand`] to register volunteers and to
//! change existing records. Registration is the only operation that emits a
//! domain event.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Volunteer, VolunteerId, VolunteerStatus};

/// Registration fields as supplied by a caller.
///
/// There is no status field: new registrations always start `ACTIVE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVolunteerRequest {
    #[schema(example = "Jane")]
    pub name: String,
    #[schema(example = "0711000111")]
    pub phone: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "Kibra")]
    pub ward: String,
    #[serde(default)]
    #[schema(example = "Health")]
    pub interest: Option<String>,
}

/// Profile fields to change; absent fields keep their current value.
///
/// The phone number cannot be changed after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
}

/// Write-side use cases for volunteer records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerCommand: Send + Sync {
    /// Register a new volunteer and publish a registration event.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the phone number is already registered, an
    /// invalid-request error for malformed input, and a service-unavailable
    /// or internal error when the store fails. Publish failures are never
    /// returned.
    async fn register(&self, request: RegisterVolunteerRequest) -> Result<Volunteer, Error>;

    /// Overwrite the status of an existing volunteer.
    async fn update_status(
        &self,
        id: VolunteerId,
        status: VolunteerStatus,
    ) -> Result<Volunteer, Error>;

    /// Change profile fields of an existing volunteer.
    async fn update_profile(
        &self,
        id: VolunteerId,
        request: UpdateProfileRequest,
    ) -> Result<Volunteer, Error>;

    /// Delete a volunteer.
    async fn delete(&self, id: VolunteerId) -> Result<(), Error>;
}
