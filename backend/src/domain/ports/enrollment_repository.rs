//! Port for enrollment persistence.
//!
//! Enrollments are keyed by their owning user: one row per user, created on
//! first write and updated in place afterwards.

use async_trait::async_trait;

use crate::domain::{Enrollment, EnrollmentDetails, EnrollmentRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
    }
}

/// Port for enrollment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fetch the user's enrollment together with its address, if any.
    ///
    /// Returns `None` when the user has never enrolled. The address is `None`
    /// when the enrollment exists without one.
    async fn find_with_address_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EnrollmentRecord>, EnrollmentRepositoryError>;

    /// Insert the user's enrollment, or overwrite its fields if one exists.
    ///
    /// `details` is both the create and the update payload. Returns the
    /// stored row so callers can key dependent writes on its id.
    async fn upsert(
        &self,
        user_id: &UserId,
        details: &EnrollmentDetails,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;
}

/// Fixture repository with no stored enrollments that echoes writes back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn find_with_address_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<EnrollmentRecord>, EnrollmentRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        details: &EnrollmentDetails,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let now = chrono::Utc::now();
        Ok(Enrollment {
            id: crate::domain::EnrollmentId::new(user_id.get()),
            user_id: *user_id,
            details: details.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let user_id = UserId::new(1).expect("valid id");
        let found = FixtureEnrollmentRepository
            .find_with_address_by_user_id(&user_id)
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_upsert_echoes_details() {
        let user_id = UserId::new(5).expect("valid id");
        let details = EnrollmentDetails {
            name: "Bia".to_owned(),
            cpf: "52998224725".to_owned(),
            birthday: Utc
                .with_ymd_and_hms(1990, 5, 17, 0, 0, 0)
                .single()
                .expect("valid date"),
            phone: "(11) 98888-7777".to_owned(),
        };

        let stored = FixtureEnrollmentRepository
            .upsert(&user_id, &details)
            .await
            .expect("fixture upsert succeeds");
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.details, details);
    }
}
