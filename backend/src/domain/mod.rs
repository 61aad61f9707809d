//! Domain primitives, ports, and the volunteer registration coordinator.
//!
//! Nothing here knows about HTTP, PostgreSQL, or Redis. The HTTP adapter
//! drives the coordinator through the ports in [`ports`]; the Diesel and
//! Redis adapters implement the driven ports.

pub mod error;
pub mod pagination;
pub mod ports;
pub mod trace_id;
pub mod volunteer;
pub mod volunteer_events;
pub mod volunteer_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::volunteer::{
    NewVolunteer, PhoneNumber, ProfileDraft, RegistrationDraft, Volunteer, VolunteerId,
    VolunteerProfileUpdate, VolunteerStatus, VolunteerValidationError, Ward,
};
pub use self::volunteer_events::{VOLUNTEER_REGISTERED, VolunteerRegisteredEvent};
pub use self::volunteer_service::{
    DEFAULT_EVENT_CHANNEL, DEFAULT_PUBLISH_TIMEOUT, PublishSettings, VolunteerRegistrationService,
    VolunteerServiceError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use volunteer_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such volunteer"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
