//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{VolunteerCommand, VolunteerQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use volunteer_service::domain::VolunteerRegistrationService;
/// use volunteer_service::inbound::http::state::HttpState;
/// use volunteer_service::outbound::persistence::InMemoryVolunteerRepository;
///
/// let service = Arc::new(VolunteerRegistrationService::new(
///     Arc::new(InMemoryVolunteerRepository::default()),
///     Arc::new(DefaultClock),
/// ));
/// let state = HttpState::new(service.clone(), service);
/// let _commands = state.volunteers.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub volunteers: Arc<dyn VolunteerCommand>,
    pub volunteers_query: Arc<dyn VolunteerQuery>,
}

impl HttpState {
    pub fn new(
        volunteers: Arc<dyn VolunteerCommand>,
        volunteers_query: Arc<dyn VolunteerQuery>,
    ) -> Self {
        Self {
            volunteers,
            volunteers_query,
        }
    }
}
