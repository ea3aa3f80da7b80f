//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{addresses, enrollments};

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating an enrollment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub cpf: &'a str,
    pub birthday: DateTime<Utc>,
    pub phone: &'a str,
}

/// Changeset applied when the user's enrollment already exists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = enrollments)]
pub(crate) struct EnrollmentUpdate<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub birthday: DateTime<Utc>,
    pub phone: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i32,
    pub enrollment_id: i32,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub number: String,
    pub state: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating an address. A `None` detail inserts NULL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub enrollment_id: i32,
    pub cep: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub number: &'a str,
    pub state: &'a str,
    pub neighborhood: &'a str,
    pub address_detail: Option<&'a str>,
}

/// Changeset applied when the enrollment already has an address.
///
/// Diesel skips `None` fields in a changeset, so an omitted detail keeps the
/// stored value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = addresses)]
pub(crate) struct AddressUpdate<'a> {
    pub cep: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub number: &'a str,
    pub state: &'a str,
    pub neighborhood: &'a str,
    pub address_detail: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
