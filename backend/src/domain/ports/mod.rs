//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`PostalCodeLookup`]) describe what the domain
//! needs from storage and the postal-code directory. Driving ports
//! ([`EnrollmentQuery`], [`EnrollmentCommand`]) are the use cases inbound
//! adapters call. Every driven port exposes a strongly typed error so adapters
//! map their failures into predictable variants.

mod macros;

pub(crate) use macros::define_port_error;

mod address_repository;
mod enrollment_command;
mod enrollment_query;
mod enrollment_repository;
mod postal_code_lookup;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
pub use address_repository::{AddressRepository, AddressRepositoryError, FixtureAddressRepository};
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::{
    CreateOrUpdateEnrollmentRequest, EnrollmentCommand, FixtureEnrollmentCommand,
};
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
pub use enrollment_query::{EnrollmentQuery, FixtureEnrollmentQuery};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError, FixtureEnrollmentRepository,
};
#[cfg(test)]
pub use postal_code_lookup::MockPostalCodeLookup;
pub use postal_code_lookup::{FixturePostalCodeLookup, PostalCodeLookup, PostalCodeLookupError};
