//! Reqwest-backed ViaCEP lookup.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into the domain `PostalAddress`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::dto::{ViaCepAddressDto, is_truthy};
use crate::domain::PostalAddress;
use crate::domain::ports::{PostalCodeLookup, PostalCodeLookupError};

/// Public ViaCEP web service root.
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws/";

/// Postal-code lookup that calls a ViaCEP-compatible endpoint.
pub struct ViaCepLookup {
    client: Client,
    base_url: Url,
}

impl ViaCepLookup {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn lookup_url(&self, postal_code: &str) -> Result<Url, PostalCodeLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PostalCodeLookupError::invalid_request(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend([postal_code, "json", ""]);
        Ok(url)
    }
}

#[async_trait]
impl PostalCodeLookup for ViaCepLookup {
    async fn lookup(&self, postal_code: &str) -> Result<PostalAddress, PostalCodeLookupError> {
        let url = self.lookup_url(postal_code)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_address(postal_code, body.as_ref())
    }
}

fn parse_address(postal_code: &str, body: &[u8]) -> Result<PostalAddress, PostalCodeLookupError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PostalCodeLookupError::not_found(postal_code));
    }

    let value: Value = serde_json::from_slice(body).map_err(decode_error)?;
    if !is_truthy(&value) {
        return Err(PostalCodeLookupError::not_found(postal_code));
    }
    let dto: ViaCepAddressDto = serde_json::from_value(value).map_err(decode_error)?;
    if dto.is_flagged() {
        return Err(PostalCodeLookupError::no_content(postal_code));
    }
    Ok(dto.into_domain())
}

fn decode_error(error: serde_json::Error) -> PostalCodeLookupError {
    PostalCodeLookupError::decode(format!("invalid ViaCEP JSON payload: {error}"))
}

fn map_transport_error(error: reqwest::Error) -> PostalCodeLookupError {
    if error.is_timeout() {
        PostalCodeLookupError::timeout(error.to_string())
    } else {
        PostalCodeLookupError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostalCodeLookupError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PostalCodeLookupError::timeout(message)
        }
        _ if status.is_client_error() => PostalCodeLookupError::invalid_request(message),
        _ => PostalCodeLookupError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
