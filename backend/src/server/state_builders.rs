//! Builders for the HTTP state from configured adapters.

use std::sync::Arc;

use actix_web::web;
use enrollments::domain::EnrollmentService;
use enrollments::domain::ports::{FixturePostalCodeLookup, PostalCodeLookup};
use enrollments::inbound::http::state::HttpState;
use enrollments::outbound::persistence::{DieselAddressRepository, DieselEnrollmentRepository};
use tracing::warn;

use super::ServerConfig;

/// Build handler state, using Diesel-backed repositories when a pool is
/// configured and fixtures otherwise.
///
/// The postal-code client is shared between the enrollment service and the
/// public lookup route.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let postal_codes: Arc<dyn PostalCodeLookup> = config
        .postal_codes
        .clone()
        .unwrap_or_else(|| Arc::new(FixturePostalCodeLookup));

    let state = match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(EnrollmentService::new(
                Arc::new(DieselEnrollmentRepository::new(pool.clone())),
                Arc::new(DieselAddressRepository::new(pool.clone())),
                postal_codes.clone(),
            ));
            HttpState {
                enrollments: service.clone(),
                enrollments_query: service,
                postal_codes,
            }
        }
        None => {
            warn!("no database configured; enrollment routes use fixture data");
            HttpState {
                postal_codes,
                ..HttpState::fixtures()
            }
        }
    };
    web::Data::new(state)
}
