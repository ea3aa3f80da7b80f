//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{Enrollment, EnrollmentDetails, EnrollmentId, EnrollmentRecord, UserId};

use super::diesel_address_repository::row_to_address;
use super::diesel_error_mapping::{classify_diesel_error, classify_pool_error, to_port_error};
use super::models::{AddressRow, EnrollmentRow, EnrollmentUpdate, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{addresses, enrollments};

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    to_port_error(
        classify_pool_error(&error),
        EnrollmentRepositoryError::connection,
        EnrollmentRepositoryError::query,
    )
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    to_port_error(
        classify_diesel_error(&error),
        EnrollmentRepositoryError::connection,
        EnrollmentRepositoryError::query,
    )
}

fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let user_id = UserId::new(row.user_id).map_err(|err| {
        EnrollmentRepositoryError::query(format!("enrollment {} has {err}", row.id))
    })?;
    Ok(Enrollment {
        id: EnrollmentId::new(row.id),
        user_id,
        details: EnrollmentDetails {
            name: row.name,
            cpf: row.cpf,
            birthday: row.birthday,
            phone: row.phone,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn find_with_address_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EnrollmentRecord>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(enrollment_row) = enrollments::table
            .filter(enrollments::user_id.eq(user_id.get()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let address_row: Option<AddressRow> = addresses::table
            .filter(addresses::enrollment_id.eq(enrollment_row.id))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(Some(EnrollmentRecord {
            enrollment: row_to_enrollment(enrollment_row)?,
            address: address_row.map(row_to_address),
        }))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        details: &EnrollmentDetails,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEnrollmentRow {
            user_id: user_id.get(),
            name: &details.name,
            cpf: &details.cpf,
            birthday: details.birthday,
            phone: &details.phone,
        };
        let update = EnrollmentUpdate {
            name: &details.name,
            cpf: &details.cpf,
            birthday: details.birthday,
            phone: &details.phone,
            updated_at: Utc::now(),
        };

        let row = diesel::insert_into(enrollments::table)
            .values(&new_row)
            .on_conflict(enrollments::user_id)
            .do_update()
            .set(&update)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_enrollment(row)
    }
}
