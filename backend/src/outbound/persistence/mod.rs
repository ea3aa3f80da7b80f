//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row structs and
//! domain types. Row structs (`models`) and table definitions (`schema`) stay
//! private to this module; connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use enrollments::outbound::persistence::{DbPool, DieselEnrollmentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/enrollments")).await?;
//! let repo = DieselEnrollmentRepository::new(pool);
//! ```

mod diesel_address_repository;
mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
