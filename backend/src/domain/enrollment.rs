//! Enrollment aggregate: a user's personal registration data and its address.
//!
//! Each user owns at most one enrollment and each enrollment owns at most one
//! address. Storage enforces both with unique keys; the types below make the
//! second invariant visible by carrying the address as an `Option`.

use chrono::{DateTime, Utc};

use super::UserId;
use super::address::{Address, AddressSummary};

/// Storage identifier of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnrollmentId(i32);

impl EnrollmentId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal fields supplied by the user. Used both to create and to update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDetails {
    /// Full name.
    pub name: String,
    /// Brazilian individual taxpayer number (CPF), stored as given.
    pub cpf: String,
    /// Date of birth as a UTC instant.
    pub birthday: DateTime<Utc>,
    /// Contact phone number.
    pub phone: String,
}

/// Stored enrollment including bookkeeping columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub details: EnrollmentDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment joined with its optional address, as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub enrollment: Enrollment,
    pub address: Option<Address>,
}

/// Client-facing view of an enrollment.
///
/// Ownership and timestamp columns are stripped from both the enrollment and
/// the address.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use enrollments::domain::{
///     Enrollment, EnrollmentDetails, EnrollmentId, EnrollmentRecord, EnrollmentWithAddress,
///     UserId,
/// };
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let record = EnrollmentRecord {
///     enrollment: Enrollment {
///         id: EnrollmentId::new(3),
///         user_id: UserId::new(9).unwrap(),
///         details: EnrollmentDetails {
///             name: "Ana".into(),
///             cpf: "12345678909".into(),
///             birthday: at,
///             phone: "(21) 99999-0000".into(),
///         },
///         created_at: at,
///         updated_at: at,
///     },
///     address: None,
/// };
///
/// let view = EnrollmentWithAddress::from(record);
/// assert_eq!(view.id, EnrollmentId::new(3));
/// assert!(view.address.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentWithAddress {
    pub id: EnrollmentId,
    pub details: EnrollmentDetails,
    pub address: Option<AddressSummary>,
}

impl From<EnrollmentRecord> for EnrollmentWithAddress {
    fn from(record: EnrollmentRecord) -> Self {
        let EnrollmentRecord {
            enrollment,
            address,
        } = record;
        Self {
            id: enrollment.id,
            details: enrollment.details,
            address: address.map(AddressSummary::from),
        }
    }
}
