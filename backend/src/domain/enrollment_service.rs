//! Enrollment use cases.
//!
//! [`EnrollmentService`] implements the [`EnrollmentQuery`] and
//! [`EnrollmentCommand`] driving ports on top of the enrollment and address
//! repositories and the postal-code lookup.
//!
//! Writes are two sequential upserts with no surrounding transaction. Any
//! failure on the write path, including a rejected postal code, is reported to
//! callers as a single `InvalidData` error; the cause is only logged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    AddressRepository, AddressRepositoryError, CreateOrUpdateEnrollmentRequest,
    EnrollmentCommand, EnrollmentQuery, EnrollmentRepository, EnrollmentRepositoryError,
    PostalCodeLookup, PostalCodeLookupError,
};
use crate::domain::{EnrollmentWithAddress, Error, UserId};

/// Message returned for every rejected enrollment write.
pub const INVALID_BODY_MESSAGE: &str = "Please put a valid body";

/// Enrollment service backed by injected ports.
///
/// The postal-code lookup may be a trait object so one configured client can
/// be shared with the public lookup route.
pub struct EnrollmentService<E, A, L: ?Sized> {
    enrollments: Arc<E>,
    addresses: Arc<A>,
    postal_codes: Arc<L>,
}

impl<E, A, L: ?Sized> EnrollmentService<E, A, L> {
    /// Create a new service from its collaborators.
    pub fn new(enrollments: Arc<E>, addresses: Arc<A>, postal_codes: Arc<L>) -> Self {
        Self {
            enrollments,
            addresses,
            postal_codes,
        }
    }
}

fn map_enrollment_read_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
    }
}

/// Causes of a rejected write, kept for logging only.
#[derive(Debug, thiserror::Error)]
enum WriteFailure {
    #[error(transparent)]
    PostalCode(#[from] PostalCodeLookupError),
    #[error(transparent)]
    Enrollment(#[from] EnrollmentRepositoryError),
    #[error(transparent)]
    Address(#[from] AddressRepositoryError),
}

impl<E, A, L> EnrollmentService<E, A, L>
where
    E: EnrollmentRepository,
    A: AddressRepository,
    L: PostalCodeLookup + ?Sized,
{
    async fn write(&self, request: CreateOrUpdateEnrollmentRequest) -> Result<(), WriteFailure> {
        let CreateOrUpdateEnrollmentRequest {
            user_id,
            enrollment,
            address,
        } = request;

        // The resolved address is not used; a successful lookup is the check.
        self.postal_codes.lookup(&address.cep).await?;

        let stored = self.enrollments.upsert(&user_id, &enrollment).await?;
        self.addresses.upsert(stored.id, &address).await?;
        Ok(())
    }
}

#[async_trait]
impl<E, A, L> EnrollmentQuery for EnrollmentService<E, A, L>
where
    E: EnrollmentRepository,
    A: AddressRepository,
    L: PostalCodeLookup + ?Sized,
{
    async fn fetch_with_address(&self, user_id: &UserId) -> Result<EnrollmentWithAddress, Error> {
        let record = self
            .enrollments
            .find_with_address_by_user_id(user_id)
            .await
            .map_err(map_enrollment_read_error)?
            .ok_or_else(|| Error::not_found("enrollment not found"))?;
        Ok(EnrollmentWithAddress::from(record))
    }
}

#[async_trait]
impl<E, A, L> EnrollmentCommand for EnrollmentService<E, A, L>
where
    E: EnrollmentRepository,
    A: AddressRepository,
    L: PostalCodeLookup + ?Sized,
{
    async fn create_or_update(&self, request: CreateOrUpdateEnrollmentRequest) -> Result<(), Error> {
        let user_id = request.user_id;
        self.write(request).await.map_err(|failure| {
            debug!(%user_id, error = %failure, "enrollment write rejected");
            Error::invalid_data([INVALID_BODY_MESSAGE])
        })
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
