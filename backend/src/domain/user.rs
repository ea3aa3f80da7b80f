//! Authenticated user identity as seen by this service.
//!
//! Users are owned by the identity service; enrollments only reference them
//! by their numeric identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// Identifiers are database serials and start at one.
    #[error("user id must be positive, got {0}")]
    NotPositive(i32),
}

/// Stable user identifier issued by the identity service.
///
/// # Examples
/// ```
/// use enrollments::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i32) -> Result<Self, UserIdValidationError> {
        if id <= 0 {
            return Err(UserIdValidationError::NotPositive(id));
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
