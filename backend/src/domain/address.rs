//! Postal address attached to an enrollment.

use chrono::{DateTime, Utc};

use super::enrollment::EnrollmentId;

/// Storage identifier of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressId(i32);

impl AddressId {
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

/// Address fields supplied by the user. Used both to create and to update.
///
/// `address_detail` is optional: `None` leaves any stored value untouched when
/// an existing address is updated, while `Some("")` clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDetails {
    /// Brazilian postal code (CEP), treated as opaque text.
    pub cep: String,
    pub street: String,
    pub city: String,
    pub number: String,
    pub state: String,
    pub neighborhood: String,
    /// Complement such as apartment or block.
    pub address_detail: Option<String>,
}

/// Stored address including bookkeeping columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub enrollment_id: EnrollmentId,
    pub details: AddressDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address view without ownership or timestamp columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSummary {
    pub id: AddressId,
    pub details: AddressDetails,
}

impl From<Address> for AddressSummary {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            details: address.details,
        }
    }
}
