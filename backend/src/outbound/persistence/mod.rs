//! Volunteer persistence adapters.
//!
//! - [`DieselVolunteerRepository`]: PostgreSQL via Diesel with async support
//!   through `diesel-async` and `bb8` connection pooling.
//! - [`InMemoryVolunteerRepository`]: process-local store used when no
//!   database URL is configured.
//!
//! Diesel row structs (`models.rs`) and schema definitions (`schema.rs`) are
//! internal and never exposed to the domain layer.
//!
//! # Example
//!
//! ```ignore
//! use volunteer_service::outbound::persistence::{
//!     DbPool, DieselVolunteerRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("postgres://localhost/volunteers").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/volunteers")).await?;
//! let repo = DieselVolunteerRepository::new(pool);
//! ```

mod diesel_volunteer_repository;
mod in_memory_volunteer_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_volunteer_repository::DieselVolunteerRepository;
pub use in_memory_volunteer_repository::InMemoryVolunteerRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
