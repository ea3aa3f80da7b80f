//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the enrollment, postal-code, and health endpoints
//! together with the schema wrappers from the inbound layer and the session
//! cookie security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::cep::CepAddressResponse;
use crate::inbound::http::enrollments::{
    AddressRequest, AddressResponse, EnrollmentRequest, EnrollmentResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie carrying the authenticated user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Enrollments API",
        description = "Enrollment records, their address, and Brazilian postal-code lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::enrollments::get_enrollment,
        crate::inbound::http::enrollments::post_enrollment,
        crate::inbound::http::cep::get_cep,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EnrollmentRequest,
        AddressRequest,
        EnrollmentResponse,
        AddressResponse,
        CepAddressResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "enrollments", description = "The caller's enrollment and address"),
        (name = "cep", description = "Postal-code lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
