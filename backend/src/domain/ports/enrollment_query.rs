//! Driving port for reading a user's enrollment.

use async_trait::async_trait;

use crate::domain::{Error, EnrollmentWithAddress, UserId};

/// Domain use-case port for fetching the enrollment view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// Fetch the authenticated user's enrollment and address.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the user has not
    /// enrolled yet.
    async fn fetch_with_address(&self, user_id: &UserId) -> Result<EnrollmentWithAddress, Error>;
}

/// Fixture query for a user who has never enrolled.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentQuery;

#[async_trait]
impl EnrollmentQuery for FixtureEnrollmentQuery {
    async fn fetch_with_address(&self, _user_id: &UserId) -> Result<EnrollmentWithAddress, Error> {
        Err(Error::not_found("enrollment not found"))
    }
}
