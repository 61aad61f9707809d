//! Volunteer registration coordinator.
//!
//! Registration runs as: validate, check the phone against the store,
//! persist with status `ACTIVE`, then make one best-effort attempt to
//! publish a [`VolunteerRegisteredEvent`]. Publish failures are logged and
//! counted but never reach the caller; the persisted record is returned
//! regardless.
//!
//! The phone pre-check is a fast path only. Concurrent registrations can
//! race past it, so a unique-constraint violation reported by the store at
//! insert time is treated exactly like a pre-check hit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    NoOpPublishMetrics, PublishMetrics, PublishOutcome, RegisterVolunteerRequest,
    UpdateProfileRequest, VolunteerCommand, VolunteerEventPublishError, VolunteerEventPublisher,
    VolunteerFilter, VolunteerQuery, VolunteerRepository, VolunteerRepositoryError,
};
use crate::domain::{
    Error, NewVolunteer, Page, PageRequest, ProfileDraft, RegistrationDraft, Volunteer,
    VolunteerId, VolunteerProfileUpdate, VolunteerRegisteredEvent, VolunteerStatus,
    VolunteerValidationError, Ward,
};

/// Channel used when none is configured.
pub const DEFAULT_EVENT_CHANNEL: &str = "volunteer-events";
/// Publish timeout used when none is configured.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_millis(250);

/// Typed outcomes of coordinator operations.
///
/// Duplicate and not-found are business outcomes the caller can act on;
/// [`VolunteerServiceError::PersistenceFailure`] is an infrastructure fault
/// that may be retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VolunteerServiceError {
    #[error("phone number {phone} is already registered")]
    DuplicateRegistration { phone: String },
    #[error("volunteer {id} not found")]
    NotFound { id: VolunteerId },
    #[error(transparent)]
    Validation(#[from] VolunteerValidationError),
    #[error("volunteer store failed: {0}")]
    PersistenceFailure(#[source] VolunteerRepositoryError),
}

impl From<VolunteerRepositoryError> for VolunteerServiceError {
    fn from(error: VolunteerRepositoryError) -> Self {
        match error {
            VolunteerRepositoryError::DuplicatePhone { phone } => {
                Self::DuplicateRegistration { phone }
            }
            other => Self::PersistenceFailure(other),
        }
    }
}

impl From<VolunteerServiceError> for Error {
    fn from(error: VolunteerServiceError) -> Self {
        match error {
            VolunteerServiceError::DuplicateRegistration { .. } => {
                Error::conflict("phone number is already registered").with_details(json!({
                    "field": "phone",
                    "code": "duplicate_phone",
                }))
            }
            VolunteerServiceError::NotFound { id } => {
                Error::not_found(format!("volunteer {id} not found"))
            }
            VolunteerServiceError::Validation(err) => Error::invalid_request(err.to_string())
                .with_details(json!({
                    "field": err.field(),
                    "code": err.code(),
                })),
            VolunteerServiceError::PersistenceFailure(VolunteerRepositoryError::Connection {
                message,
            }) => Error::service_unavailable(format!("volunteer store unavailable: {message}")),
            VolunteerServiceError::PersistenceFailure(err) => {
                Error::internal(format!("volunteer store error: {err}"))
            }
        }
    }
}

/// Where and how long to try publishing registration events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    pub channel: String,
    pub timeout: Duration,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            channel: DEFAULT_EVENT_CHANNEL.to_owned(),
            timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }
}

/// Coordinates volunteer registration and exposes the record operations.
///
/// Safe to share across request handlers; all state lives behind the
/// injected collaborators.
#[derive(Clone)]
pub struct VolunteerRegistrationService<R> {
    repository: Arc<R>,
    publisher: Option<Arc<dyn VolunteerEventPublisher>>,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn PublishMetrics>,
    settings: PublishSettings,
}

impl<R> VolunteerRegistrationService<R> {
    /// Create a coordinator without a publisher or metrics.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            publisher: None,
            clock,
            metrics: Arc::new(NoOpPublishMetrics),
            settings: PublishSettings::default(),
        }
    }

    /// Attach an event publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn VolunteerEventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Replace the publish metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn PublishMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Override the publish channel and timeout.
    #[must_use]
    pub fn with_publish_settings(mut self, settings: PublishSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether registration events will be published.
    pub fn has_publisher(&self) -> bool {
        self.publisher.is_some()
    }

    fn timeout_millis(&self) -> u64 {
        u64::try_from(self.settings.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    async fn record_outcome(&self, outcome: PublishOutcome) {
        if let Err(error) = self.metrics.record(outcome).await {
            warn!(outcome = outcome.as_label(), %error, "failed to record publish outcome");
        }
    }

    /// Make one bounded publish attempt for `volunteer`. Never fails.
    async fn attempt_publish(&self, volunteer: &Volunteer) {
        let channel = self.settings.channel.as_str();
        let Some(publisher) = self.publisher.as_ref() else {
            debug!(volunteer_id = %volunteer.id, channel, "no event publisher configured; skipping");
            self.record_outcome(PublishOutcome::Skipped).await;
            return;
        };

        let event = VolunteerRegisteredEvent::for_volunteer(volunteer, self.clock.utc().timestamp());
        let key = event.key();
        let attempt = publisher.publish(channel, &key, &event);
        let outcome = match tokio::time::timeout(self.settings.timeout, attempt).await {
            Ok(Ok(())) => {
                debug!(volunteer_id = %volunteer.id, channel, "published registration event");
                PublishOutcome::Published
            }
            Ok(Err(error)) => {
                warn!(
                    volunteer_id = %volunteer.id,
                    channel,
                    %error,
                    "registration event dropped"
                );
                PublishOutcome::Failed
            }
            Err(_) => {
                let error = VolunteerEventPublishError::timeout(self.timeout_millis());
                warn!(
                    volunteer_id = %volunteer.id,
                    channel,
                    %error,
                    "registration event dropped"
                );
                PublishOutcome::TimedOut
            }
        };
        self.record_outcome(outcome).await;
    }
}

impl<R> VolunteerRegistrationService<R>
where
    R: VolunteerRepository,
{
    /// Register a volunteer and attempt to publish the registration event.
    pub async fn register(
        &self,
        request: &RegisterVolunteerRequest,
    ) -> Result<Volunteer, VolunteerServiceError> {
        let candidate = NewVolunteer::try_from_draft(RegistrationDraft {
            name: &request.name,
            phone: &request.phone,
            email: request.email.as_deref(),
            ward: &request.ward,
            interest: request.interest.as_deref(),
        })?;

        if self
            .repository
            .find_by_phone(candidate.phone())
            .await?
            .is_some()
        {
            return Err(VolunteerServiceError::DuplicateRegistration {
                phone: candidate.phone().to_string(),
            });
        }

        let volunteer = self
            .repository
            .insert(&candidate, VolunteerStatus::Active, self.clock.utc())
            .await?;
        info!(volunteer_id = %volunteer.id, ward = %volunteer.ward, "volunteer registered");

        self.attempt_publish(&volunteer).await;
        Ok(volunteer)
    }

    async fn load(&self, id: VolunteerId) -> Result<Volunteer, VolunteerServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(VolunteerServiceError::NotFound { id })
    }

    async fn save(&self, volunteer: &Volunteer) -> Result<Volunteer, VolunteerServiceError> {
        self.repository
            .update(volunteer)
            .await?
            .ok_or(VolunteerServiceError::NotFound { id: volunteer.id })
    }

    /// Overwrite a volunteer's status. No event is published.
    pub async fn update_status(
        &self,
        id: VolunteerId,
        status: VolunteerStatus,
    ) -> Result<Volunteer, VolunteerServiceError> {
        let mut volunteer = self.load(id).await?;
        volunteer.status = status;
        volunteer.updated_at = self.clock.utc();
        let saved = self.save(&volunteer).await?;
        info!(volunteer_id = %id, status = %status, "volunteer status updated");
        Ok(saved)
    }

    /// Change profile fields present in `request`. No event is published.
    pub async fn update_profile(
        &self,
        id: VolunteerId,
        request: &UpdateProfileRequest,
    ) -> Result<Volunteer, VolunteerServiceError> {
        let update = VolunteerProfileUpdate::try_from_draft(ProfileDraft {
            name: request.name.as_deref(),
            email: request.email.as_deref(),
            ward: request.ward.as_deref(),
            interest: request.interest.as_deref(),
        })?;
        let mut volunteer = self.load(id).await?;
        if update.is_empty() {
            return Ok(volunteer);
        }
        volunteer.apply_profile(&update);
        volunteer.updated_at = self.clock.utc();
        self.save(&volunteer).await
    }

    /// Remove a volunteer record.
    pub async fn delete(&self, id: VolunteerId) -> Result<(), VolunteerServiceError> {
        if self.repository.delete(id).await? {
            info!(volunteer_id = %id, "volunteer deleted");
            Ok(())
        } else {
            Err(VolunteerServiceError::NotFound { id })
        }
    }

    pub async fn get_by_id(&self, id: VolunteerId) -> Result<Volunteer, VolunteerServiceError> {
        self.load(id).await
    }

    async fn page(
        &self,
        filter: VolunteerFilter,
        request: PageRequest,
    ) -> Result<Page<Volunteer>, VolunteerServiceError> {
        let items = self.repository.list(&filter, Some(request)).await?;
        let total = self.repository.count(&filter).await?;
        Ok(Page::new(items, request, total))
    }

    async fn list(&self, filter: VolunteerFilter) -> Result<Vec<Volunteer>, VolunteerServiceError> {
        Ok(self.repository.list(&filter, None).await?)
    }

    pub async fn list_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<Volunteer>, VolunteerServiceError> {
        self.page(VolunteerFilter::all(), request).await
    }

    pub async fn list_by_ward(&self, ward: &str) -> Result<Vec<Volunteer>, VolunteerServiceError> {
        self.list(VolunteerFilter::all().with_ward(Ward::new(ward)?))
            .await
    }

    pub async fn list_by_status(
        &self,
        status: VolunteerStatus,
    ) -> Result<Vec<Volunteer>, VolunteerServiceError> {
        self.list(VolunteerFilter::all().with_status(status)).await
    }

    pub async fn list_active(&self) -> Result<Vec<Volunteer>, VolunteerServiceError> {
        self.list_by_status(VolunteerStatus::Active).await
    }

    pub async fn list_active_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<Volunteer>, VolunteerServiceError> {
        self.page(
            VolunteerFilter::all().with_status(VolunteerStatus::Active),
            request,
        )
        .await
    }

    pub async fn list_active_by_ward(
        &self,
        ward: &str,
    ) -> Result<Vec<Volunteer>, VolunteerServiceError> {
        let filter = VolunteerFilter::all()
            .with_ward(Ward::new(ward)?)
            .with_status(VolunteerStatus::Active);
        self.list(filter).await
    }

    pub async fn count_active(&self) -> Result<u64, VolunteerServiceError> {
        let filter = VolunteerFilter::all().with_status(VolunteerStatus::Active);
        Ok(self.repository.count(&filter).await?)
    }

    pub async fn count_by_ward(&self, ward: &str) -> Result<u64, VolunteerServiceError> {
        let filter = VolunteerFilter::all().with_ward(Ward::new(ward)?);
        Ok(self.repository.count(&filter).await?)
    }
}

#[async_trait]
impl<R> VolunteerCommand for VolunteerRegistrationService<R>
where
    R: VolunteerRepository,
{
    async fn register(&self, request: RegisterVolunteerRequest) -> Result<Volunteer, Error> {
        Ok(Self::register(self, &request).await?)
    }

    async fn update_status(
        &self,
        id: VolunteerId,
        status: VolunteerStatus,
    ) -> Result<Volunteer, Error> {
        Ok(Self::update_status(self, id, status).await?)
    }

    async fn update_profile(
        &self,
        id: VolunteerId,
        request: UpdateProfileRequest,
    ) -> Result<Volunteer, Error> {
        Ok(Self::update_profile(self, id, &request).await?)
    }

    async fn delete(&self, id: VolunteerId) -> Result<(), Error> {
        Ok(Self::delete(self, id).await?)
    }
}

#[async_trait]
impl<R> VolunteerQuery for VolunteerRegistrationService<R>
where
    R: VolunteerRepository,
{
    async fn get_by_id(&self, id: VolunteerId) -> Result<Volunteer, Error> {
        Ok(Self::get_by_id(self, id).await?)
    }

    async fn list_all(&self, page: PageRequest) -> Result<Page<Volunteer>, Error> {
        Ok(Self::list_all(self, page).await?)
    }

    async fn list_by_ward(&self, ward: String) -> Result<Vec<Volunteer>, Error> {
        Ok(Self::list_by_ward(self, &ward).await?)
    }

    async fn list_by_status(&self, status: VolunteerStatus) -> Result<Vec<Volunteer>, Error> {
        Ok(Self::list_by_status(self, status).await?)
    }

    async fn list_active(&self) -> Result<Vec<Volunteer>, Error> {
        Ok(Self::list_active(self).await?)
    }

    async fn list_active_page(&self, page: PageRequest) -> Result<Page<Volunteer>, Error> {
        Ok(Self::list_active_page(self, page).await?)
    }

    async fn list_active_by_ward(&self, ward: String) -> Result<Vec<Volunteer>, Error> {
        Ok(Self::list_active_by_ward(self, &ward).await?)
    }

    async fn count_active(&self) -> Result<u64, Error> {
        Ok(Self::count_active(self).await?)
    }

    async fn count_by_ward(&self, ward: String) -> Result<u64, Error> {
        Ok(Self::count_by_ward(self, &ward).await?)
    }
}

#[cfg(test)]
#[path = "volunteer_service_tests.rs"]
mod tests;
