//! Process-local `VolunteerRepository` used when no database is configured.
//!
//! Records live in a `BTreeMap` keyed by identifier so listings come back in
//! ascending id order, matching the Diesel adapter. Phone uniqueness is
//! checked under the same lock as the insert.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{VolunteerFilter, VolunteerRepository, VolunteerRepositoryError};
use crate::domain::{NewVolunteer, PageRequest, PhoneNumber, Volunteer, VolunteerId, VolunteerStatus};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    records: BTreeMap<i64, Volunteer>,
}

/// In-memory volunteer store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryVolunteerRepository {
    store: Mutex<Store>,
}

impl InMemoryVolunteerRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Store>, VolunteerRepositoryError> {
        self.store
            .lock()
            .map_err(|_| VolunteerRepositoryError::query("in-memory store poisoned"))
    }
}

#[async_trait]
impl VolunteerRepository for InMemoryVolunteerRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .records
            .values()
            .find(|volunteer| volunteer.phone == *phone)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: VolunteerId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let store = self.lock()?;
        Ok(store.records.get(&id.get()).cloned())
    }

    async fn insert(
        &self,
        volunteer: &NewVolunteer,
        status: VolunteerStatus,
        registered_at: DateTime<Utc>,
    ) -> Result<Volunteer, VolunteerRepositoryError> {
        let mut store = self.lock()?;
        if store
            .records
            .values()
            .any(|existing| existing.phone == *volunteer.phone())
        {
            return Err(VolunteerRepositoryError::duplicate_phone(
                volunteer.phone().as_str(),
            ));
        }

        store.next_id += 1;
        let id = store.next_id;
        let record = Volunteer {
            id: VolunteerId::new(id),
            name: volunteer.name().to_owned(),
            phone: volunteer.phone().clone(),
            email: volunteer.email().map(str::to_owned),
            ward: volunteer.ward().clone(),
            interest: volunteer.interest().map(str::to_owned),
            status,
            created_at: registered_at,
            updated_at: registered_at,
        };
        store.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        volunteer: &Volunteer,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut store = self.lock()?;
        let Some(existing) = store.records.get_mut(&volunteer.id.get()) else {
            return Ok(None);
        };
        let created_at = existing.created_at;
        let phone = existing.phone.clone();
        *existing = Volunteer {
            phone,
            created_at,
            ..volunteer.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: VolunteerId) -> Result<bool, VolunteerRepositoryError> {
        let mut store = self.lock()?;
        Ok(store.records.remove(&id.get()).is_some())
    }

    async fn list(
        &self,
        filter: &VolunteerFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        let store = self.lock()?;
        let matching = store
            .records
            .values()
            .filter(|volunteer| filter.matches(volunteer));
        let selected: Vec<Volunteer> = match page {
            Some(page) => matching
                .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(page.size()).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(selected)
    }

    async fn count(&self, filter: &VolunteerFilter) -> Result<u64, VolunteerRepositoryError> {
        let store = self.lock()?;
        let total = store
            .records
            .values()
            .filter(|volunteer| filter.matches(volunteer))
            .count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }
}
