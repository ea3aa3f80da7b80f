//! Driven port for resolving Brazilian postal codes (CEP) into addresses.
//!
//! The `/cep` endpoint and the enrollment write path both go through this
//! port, so the upstream response is normalised in exactly one adapter.

use async_trait::async_trait;

use crate::domain::PostalAddress;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while resolving a postal code.
    pub enum PostalCodeLookupError {
        /// The directory returned no data at all for the code.
        NotFound { postal_code: String } =>
            "no address data returned for postal code {postal_code}",
        /// The directory answered but flagged the code as unknown.
        NoContent { postal_code: String } =>
            "postal code {postal_code} is flagged as nonexistent",
        /// The directory rejected the request.
        InvalidRequest { message: String } =>
            "postal code lookup rejected: {message}",
        /// Network transport failed or the directory returned a server error.
        Transport { message: String } =>
            "postal code lookup transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "postal code lookup timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "postal code lookup returned an undecodable body: {message}",
    }
}

/// Port for resolving a postal code.
///
/// The postal code is opaque; implementations do not validate its format
/// before calling out. One call, no retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    /// Resolve `postal_code` to a normalised address.
    async fn lookup(&self, postal_code: &str) -> Result<PostalAddress, PostalCodeLookupError>;
}

/// Fixture lookup that resolves every code to a fixed address in São Paulo.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostalCodeLookup;

#[async_trait]
impl PostalCodeLookup for FixturePostalCodeLookup {
    async fn lookup(&self, _postal_code: &str) -> Result<PostalAddress, PostalCodeLookupError> {
        Ok(PostalAddress {
            street: Some("Praça da Sé".to_owned()),
            complement: Some("lado ímpar".to_owned()),
            neighborhood: Some("Sé".to_owned()),
            city: Some("São Paulo".to_owned()),
            state: Some("SP".to_owned()),
        })
    }
}
