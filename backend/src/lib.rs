//! Enrollment backend library.
//!
//! Hexagonal layout: [`domain`] holds the model, ports, and the enrollment
//! service; [`inbound`] exposes it over HTTP; [`outbound`] implements the
//! driven ports with Diesel and the ViaCEP HTTP client.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
