//! Domain primitives, aggregates, and use cases.
//!
//! Purpose: define the enrollment model and the services that operate on it
//! without depending on HTTP, Diesel, or reqwest. Adapters reach the domain
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserId: identifier issued by the identity service.
//! - Enrollment, Address and their views: the enrollment aggregate.
//! - PostalAddress: normalised postal-code lookup result.
//! - EnrollmentService: implementation of the enrollment driving ports.
//! - TraceId: request-scoped correlation identifier.

mod address;
mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod ports;
mod postal_address;
pub mod trace_id;
mod user;

pub use self::address::{Address, AddressDetails, AddressId, AddressSummary};
pub use self::enrollment::{
    Enrollment, EnrollmentDetails, EnrollmentId, EnrollmentRecord, EnrollmentWithAddress,
};
pub use self::enrollment_service::{EnrollmentService, INVALID_BODY_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::postal_address::PostalAddress;
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserIdValidationError};
