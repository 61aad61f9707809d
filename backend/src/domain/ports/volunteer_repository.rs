//! Port abstraction for volunteer persistence adapters and their errors.
//!
//! The store is the source of truth for phone uniqueness: adapters must
//! enforce it atomically on insert and report a violation as
//! [`VolunteerRepositoryError::DuplicatePhone`], even when the caller already
//! checked [`VolunteerRepository::find_by_phone`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewVolunteer, PageRequest, PhoneNumber, Volunteer, VolunteerId, VolunteerStatus, Ward,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by volunteer repository adapters.
    pub enum VolunteerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "volunteer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "volunteer repository query failed: {message}",
        /// The unique phone constraint rejected the write.
        DuplicatePhone { phone: String } => "phone number already registered: {phone}",
    }
}

/// Conjunctive filter over volunteer records. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerFilter {
    pub ward: Option<Ward>,
    pub status: Option<VolunteerStatus>,
}

impl VolunteerFilter {
    /// Match every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a ward.
    #[must_use]
    pub fn with_ward(mut self, ward: Ward) -> Self {
        self.ward = Some(ward);
        self
    }

    /// Restrict to a status.
    #[must_use]
    pub fn with_status(mut self, status: VolunteerStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether `volunteer` satisfies the filter.
    #[must_use]
    pub fn matches(&self, volunteer: &Volunteer) -> bool {
        self.ward.as_ref().is_none_or(|ward| *ward == volunteer.ward)
            && self.status.is_none_or(|status| status == volunteer.status)
    }
}

/// Volunteer storage. Listings are ordered by ascending identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Fetch the record registered with `phone`, if any.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(
        &self,
        id: VolunteerId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Atomically persist a new record with `status`, assigning its identity.
    ///
    /// `registered_at` becomes both `created_at` and `updated_at`.
    async fn insert(
        &self,
        volunteer: &NewVolunteer,
        status: VolunteerStatus,
        registered_at: DateTime<Utc>,
    ) -> Result<Volunteer, VolunteerRepositoryError>;

    /// Overwrite the mutable fields of an existing record.
    ///
    /// Returns `None` when no record has the given identifier.
    async fn update(
        &self,
        volunteer: &Volunteer,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Remove a record. Returns whether one existed.
    async fn delete(&self, id: VolunteerId) -> Result<bool, VolunteerRepositoryError>;

    /// List records matching `filter`, optionally restricted to one page.
    async fn list(
        &self,
        filter: &VolunteerFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Volunteer>, VolunteerRepositoryError>;

    /// Count records matching `filter`.
    async fn count(&self, filter: &VolunteerFilter) -> Result<u64, VolunteerRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn volunteer(ward: &str, status: VolunteerStatus) -> Volunteer {
        let at = Utc
            .timestamp_opt(0, 0)
            .single()
            .expect("valid timestamp");
        Volunteer {
            id: VolunteerId::new(1),
            name: "Jane".to_owned(),
            phone: PhoneNumber::new("0711000111").expect("valid phone"),
            email: None,
            ward: Ward::new(ward).expect("valid ward"),
            interest: None,
            status,
            created_at: at,
            updated_at: at,
        }
    }

    fn kibra() -> Ward {
        Ward::new("Kibra").expect("valid ward")
    }

    #[rstest]
    #[case(VolunteerFilter::all(), "Langata", VolunteerStatus::Suspended, true)]
    #[case(VolunteerFilter::all().with_ward(kibra()), "Kibra", VolunteerStatus::Active, true)]
    #[case(VolunteerFilter::all().with_ward(kibra()), "Langata", VolunteerStatus::Active, false)]
    #[case(
        VolunteerFilter::all().with_status(VolunteerStatus::Active),
        "Kibra",
        VolunteerStatus::Inactive,
        false
    )]
    #[case(
        VolunteerFilter::all().with_ward(kibra()).with_status(VolunteerStatus::Active),
        "Kibra",
        VolunteerStatus::Active,
        true
    )]
    fn filter_matches_conjunctively(
        #[case] filter: VolunteerFilter,
        #[case] ward: &str,
        #[case] status: VolunteerStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(&volunteer(ward, status)), expected);
    }

    #[rstest]
    fn error_constructors_accept_str() {
        let err = VolunteerRepositoryError::duplicate_phone("0711000111");
        assert_eq!(err.to_string(), "phone number already registered: 0711000111");
    }
}
