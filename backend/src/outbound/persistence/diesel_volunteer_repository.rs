//! PostgreSQL-backed `VolunteerRepository` implementation using Diesel ORM.
//!
//! Phone uniqueness is enforced by the `volunteers_phone_key` constraint; a
//! violation is reported as `DuplicatePhone` so racing registrations are
//! rejected even when both passed the coordinator's pre-check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{VolunteerFilter, VolunteerRepository, VolunteerRepositoryError};
use crate::domain::{
    NewVolunteer, PageRequest, PhoneNumber, Volunteer, VolunteerId, VolunteerStatus, Ward,
};

use super::models::{NewVolunteerRow, VolunteerChangeset, VolunteerRow};
use super::pool::{DbPool, PoolError};
use super::schema::volunteers;

/// Diesel-backed implementation of the `VolunteerRepository` port.
#[derive(Clone)]
pub struct DieselVolunteerRepository {
    pool: DbPool,
}

impl DieselVolunteerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VolunteerRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            VolunteerRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// `phone` is only supplied by writes that can trip the unique constraint.
fn map_diesel_error(error: diesel::result::Error, phone: Option<&str>) -> VolunteerRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match (error, phone) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(phone)) => {
            VolunteerRepositoryError::duplicate_phone(phone)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _) => {
            VolunteerRepositoryError::connection("database connection error")
        }
        (DieselError::NotFound, _) => VolunteerRepositoryError::query("record not found"),
        (DieselError::QueryBuilderError(_), _) => {
            VolunteerRepositoryError::query("database query error")
        }
        _ => VolunteerRepositoryError::query("database error"),
    }
}

fn row_to_volunteer(row: VolunteerRow) -> Result<Volunteer, VolunteerRepositoryError> {
    let corrupt = |field: &str| {
        VolunteerRepositoryError::query(format!("stored volunteer {} has invalid {field}", row.id))
    };
    let phone = PhoneNumber::new(&row.phone).map_err(|_| corrupt("phone"))?;
    let ward = Ward::new(&row.ward).map_err(|_| corrupt("ward"))?;
    let status = row
        .status
        .parse::<VolunteerStatus>()
        .map_err(|_| corrupt("status"))?;

    Ok(Volunteer {
        id: VolunteerId::new(row.id),
        name: row.name,
        phone,
        email: row.email,
        ward,
        interest: row.interest,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_volunteers(rows: Vec<VolunteerRow>) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
    rows.into_iter().map(row_to_volunteer).collect()
}

fn filtered(filter: &VolunteerFilter) -> volunteers::BoxedQuery<'_, Pg> {
    let mut query = volunteers::table.into_boxed();
    if let Some(ward) = &filter.ward {
        query = query.filter(volunteers::ward.eq(ward.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(volunteers::status.eq(status.as_str()));
    }
    query
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl VolunteerRepository for DieselVolunteerRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<VolunteerRow> = volunteers::table
            .filter(volunteers::phone.eq(phone.as_str()))
            .select(VolunteerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_volunteer).transpose()
    }

    async fn find_by_id(
        &self,
        id: VolunteerId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<VolunteerRow> = volunteers::table
            .find(id.get())
            .select(VolunteerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_volunteer).transpose()
    }

    async fn insert(
        &self,
        volunteer: &NewVolunteer,
        status: VolunteerStatus,
        registered_at: DateTime<Utc>,
    ) -> Result<Volunteer, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewVolunteerRow {
            name: volunteer.name(),
            phone: volunteer.phone().as_str(),
            email: volunteer.email(),
            ward: volunteer.ward().as_str(),
            interest: volunteer.interest(),
            status: status.as_str(),
            created_at: registered_at,
            updated_at: registered_at,
        };

        let row = diesel::insert_into(volunteers::table)
            .values(&new_row)
            .returning(VolunteerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(volunteer.phone().as_str())))?;

        row_to_volunteer(row)
    }

    async fn update(
        &self,
        volunteer: &Volunteer,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = VolunteerChangeset {
            name: &volunteer.name,
            email: volunteer.email.as_deref(),
            ward: volunteer.ward.as_str(),
            interest: volunteer.interest.as_deref(),
            status: volunteer.status.as_str(),
            updated_at: volunteer.updated_at,
        };

        let row: Option<VolunteerRow> = diesel::update(volunteers::table.find(volunteer.id.get()))
            .set(&changeset)
            .returning(VolunteerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_volunteer).transpose()
    }

    async fn delete(&self, id: VolunteerId) -> Result<bool, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(volunteers::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(removed > 0)
    }

    async fn list(
        &self,
        filter: &VolunteerFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = filtered(filter).order(volunteers::id.asc());
        if let Some(page) = page {
            query = query
                .limit(i64::from(page.size()))
                .offset(to_sql_bound(page.offset()));
        }

        let rows: Vec<VolunteerRow> = query
            .select(VolunteerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows_to_volunteers(rows)
    }

    async fn count(&self, filter: &VolunteerFilter) -> Result<u64, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        u64::try_from(total).map_err(|_| VolunteerRepositoryError::query("negative row count"))
    }
}
