//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EnrollmentCommand, EnrollmentQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery,
    FixturePostalCodeLookup, PostalCodeLookup,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use enrollments::domain::ports::{
///     FixtureEnrollmentCommand, FixtureEnrollmentQuery, FixturePostalCodeLookup,
/// };
/// use enrollments::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     enrollments: Arc::new(FixtureEnrollmentCommand),
///     enrollments_query: Arc::new(FixtureEnrollmentQuery),
///     postal_codes: Arc::new(FixturePostalCodeLookup),
/// };
/// let _query = state.enrollments_query.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
    pub postal_codes: Arc<dyn PostalCodeLookup>,
}

impl HttpState {
    /// State wired entirely to fixture ports, for smoke runs without
    /// PostgreSQL or network access.
    pub fn fixtures() -> Self {
        Self {
            enrollments: Arc::new(FixtureEnrollmentCommand),
            enrollments_query: Arc::new(FixtureEnrollmentQuery),
            postal_codes: Arc::new(FixturePostalCodeLookup),
        }
    }
}
