//! Driving port for volunteer read operations.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, Volunteer, VolunteerId, VolunteerStatus};

/// Read-side use cases for volunteer records.
///
/// Ward arguments are raw caller input; implementations validate them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerQuery: Send + Sync {
    /// Fetch one volunteer.
    async fn get_by_id(&self, id: VolunteerId) -> Result<Volunteer, Error>;

    /// Page through every volunteer.
    async fn list_all(&self, page: PageRequest) -> Result<Page<Volunteer>, Error>;

    /// Every volunteer in `ward`.
    async fn list_by_ward(&self, ward: String) -> Result<Vec<Volunteer>, Error>;

    /// Every volunteer with `status`.
    async fn list_by_status(&self, status: VolunteerStatus) -> Result<Vec<Volunteer>, Error>;

    /// Every active volunteer.
    async fn list_active(&self) -> Result<Vec<Volunteer>, Error>;

    /// Page through active volunteers.
    async fn list_active_page(&self, page: PageRequest) -> Result<Page<Volunteer>, Error>;

    /// Every active volunteer in `ward`.
    async fn list_active_by_ward(&self, ward: String) -> Result<Vec<Volunteer>, Error>;

    /// Number of active volunteers.
    async fn count_active(&self) -> Result<u64, Error>;

    /// Number of volunteers in `ward`, regardless of status.
    async fn count_by_ward(&self, ward: String) -> Result<u64, Error>;
}
