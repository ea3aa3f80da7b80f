//! Driving port for creating or updating a user's enrollment and address.

use async_trait::async_trait;

use crate::domain::{AddressDetails, EnrollmentDetails, Error, UserId};

/// Input for [`EnrollmentCommand::create_or_update`].
///
/// The enrollment and address fields arrive already separated so the service
/// can upsert each row with its own payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrUpdateEnrollmentRequest {
    pub user_id: UserId,
    pub enrollment: EnrollmentDetails,
    pub address: AddressDetails,
}

/// Domain use-case port for writing an enrollment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Validate the address postal code, then upsert the enrollment and its
    /// address.
    ///
    /// Every failure is reported as [`crate::domain::ErrorCode::InvalidData`].
    async fn create_or_update(&self, request: CreateOrUpdateEnrollmentRequest) -> Result<(), Error>;
}

/// Fixture command that accepts every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentCommand;

#[async_trait]
impl EnrollmentCommand for FixtureEnrollmentCommand {
    async fn create_or_update(
        &self,
        _request: CreateOrUpdateEnrollmentRequest,
    ) -> Result<(), Error> {
        Ok(())
    }
}
