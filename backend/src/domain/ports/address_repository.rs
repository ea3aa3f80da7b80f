//! Port for enrollment address persistence.

use async_trait::async_trait;

use crate::domain::{Address, AddressDetails, AddressId, EnrollmentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by address repository adapters.
    pub enum AddressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "address repository query failed: {message}",
    }
}

/// Port for the single address owned by an enrollment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert the enrollment's address, or overwrite it if one exists.
    ///
    /// `details` is both the create and the update payload, except that an
    /// `address_detail` of `None` leaves a stored detail unchanged.
    async fn upsert(
        &self,
        enrollment_id: EnrollmentId,
        details: &AddressDetails,
    ) -> Result<Address, AddressRepositoryError>;
}

/// Fixture repository that echoes writes back without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAddressRepository;

#[async_trait]
impl AddressRepository for FixtureAddressRepository {
    async fn upsert(
        &self,
        enrollment_id: EnrollmentId,
        details: &AddressDetails,
    ) -> Result<Address, AddressRepositoryError> {
        let now = chrono::Utc::now();
        Ok(Address {
            id: AddressId::new(enrollment_id.get()),
            enrollment_id,
            details: details.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}
