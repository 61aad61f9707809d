//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::volunteers;

/// Row struct for reading from the volunteers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub ward: String,
    pub interest: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new registrations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteers)]
pub(crate) struct NewVolunteerRow<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub ward: &'a str,
    pub interest: Option<&'a str>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable columns; `phone` never changes.
///
/// `treat_none_as_null` so clearing email or interest is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = volunteers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VolunteerChangeset<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub ward: &'a str,
    pub interest: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
