//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.
//!
//! The unique index on `addresses.enrollment_id` is the upsert target, which
//! keeps each enrollment at a single address.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AddressRepository, AddressRepositoryError};
use crate::domain::{Address, AddressDetails, AddressId, EnrollmentId};

use super::diesel_error_mapping::{classify_diesel_error, classify_pool_error, to_port_error};
use super::models::{AddressRow, AddressUpdate, NewAddressRow};
use super::pool::{DbPool, PoolError};
use super::schema::addresses;

/// Diesel-backed implementation of the `AddressRepository` port.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AddressRepositoryError {
    to_port_error(
        classify_pool_error(&error),
        AddressRepositoryError::connection,
        AddressRepositoryError::query,
    )
}

fn map_diesel_error(error: diesel::result::Error) -> AddressRepositoryError {
    to_port_error(
        classify_diesel_error(&error),
        AddressRepositoryError::connection,
        AddressRepositoryError::query,
    )
}

/// Convert a stored row into the domain address.
pub(super) fn row_to_address(row: AddressRow) -> Address {
    Address {
        id: AddressId::new(row.id),
        enrollment_id: EnrollmentId::new(row.enrollment_id),
        details: AddressDetails {
            cep: row.cep,
            street: row.street,
            city: row.city,
            number: row.number,
            state: row.state,
            neighborhood: row.neighborhood,
            address_detail: row.address_detail,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn new_row(enrollment_id: EnrollmentId, details: &AddressDetails) -> NewAddressRow<'_> {
    NewAddressRow {
        enrollment_id: enrollment_id.get(),
        cep: &details.cep,
        street: &details.street,
        city: &details.city,
        number: &details.number,
        state: &details.state,
        neighborhood: &details.neighborhood,
        address_detail: details.address_detail.as_deref(),
    }
}

fn update(details: &AddressDetails) -> AddressUpdate<'_> {
    AddressUpdate {
        cep: &details.cep,
        street: &details.street,
        city: &details.city,
        number: &details.number,
        state: &details.state,
        neighborhood: &details.neighborhood,
        address_detail: details.address_detail.as_deref(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn upsert(
        &self,
        enrollment_id: EnrollmentId,
        details: &AddressDetails,
    ) -> Result<Address, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(addresses::table)
            .values(&new_row(enrollment_id, details))
            .on_conflict(addresses::enrollment_id)
            .do_update()
            .set(&update(details))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_address(row))
    }
}
