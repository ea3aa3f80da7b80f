//! Enrollment API handlers.
//!
//! ```text
//! GET /enrollment
//! POST /enrollment {"name":"…","cpf":"…","birthday":"1990-05-17","phone":"…","address":{…}}
//! ```
//!
//! Both routes require a session. Once the caller is authenticated, every
//! failure collapses into a fixed bodiless status: 204 for reads and 400 for
//! writes. The underlying cause is logged at debug level.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::CreateOrUpdateEnrollmentRequest;
use crate::domain::{
    AddressDetails, AddressSummary, EnrollmentDetails, EnrollmentWithAddress, Error, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date_or_timestamp, require};

/// Address part of [`EnrollmentRequest`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[schema(example = "01001000")]
    pub cep: Option<String>,
    #[schema(example = "Praça da Sé")]
    pub street: Option<String>,
    #[schema(example = "São Paulo")]
    pub city: Option<String>,
    #[schema(example = "100")]
    pub number: Option<String>,
    #[schema(example = "SP")]
    pub state: Option<String>,
    #[schema(example = "Sé")]
    pub neighborhood: Option<String>,
    /// Optional complement. Omitted keeps the stored value; `""` clears it.
    #[schema(example = "Apto 12")]
    pub address_detail: Option<String>,
}

/// Request body for `POST /enrollment`.
///
/// Every field except `address.addressDetail` is required; they are optional
/// here so a missing field is reported by the handler instead of the JSON
/// extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    #[schema(example = "Maria Souza")]
    pub name: Option<String>,
    #[schema(example = "12345678909")]
    pub cpf: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    #[schema(example = "1990-05-17")]
    pub birthday: Option<String>,
    #[schema(example = "(11) 99999-0000")]
    pub phone: Option<String>,
    pub address: Option<AddressRequest>,
}

const NAME: FieldName = FieldName::new("name");
const CPF: FieldName = FieldName::new("cpf");
const BIRTHDAY: FieldName = FieldName::new("birthday");
const PHONE: FieldName = FieldName::new("phone");
const ADDRESS: FieldName = FieldName::new("address");
const CEP: FieldName = FieldName::new("address.cep");
const STREET: FieldName = FieldName::new("address.street");
const CITY: FieldName = FieldName::new("address.city");
const NUMBER: FieldName = FieldName::new("address.number");
const STATE: FieldName = FieldName::new("address.state");
const NEIGHBORHOOD: FieldName = FieldName::new("address.neighborhood");

impl AddressRequest {
    fn into_details(self) -> Result<AddressDetails, Error> {
        Ok(AddressDetails {
            cep: require(self.cep, CEP)?,
            street: require(self.street, STREET)?,
            city: require(self.city, CITY)?,
            number: require(self.number, NUMBER)?,
            state: require(self.state, STATE)?,
            neighborhood: require(self.neighborhood, NEIGHBORHOOD)?,
            address_detail: self.address_detail,
        })
    }
}

impl EnrollmentRequest {
    /// Split the body into the enrollment and address payloads.
    fn into_command(self, user_id: UserId) -> Result<CreateOrUpdateEnrollmentRequest, Error> {
        let birthday = require(self.birthday, BIRTHDAY)?;
        let enrollment = EnrollmentDetails {
            name: require(self.name, NAME)?,
            cpf: require(self.cpf, CPF)?,
            birthday: parse_date_or_timestamp(&birthday, BIRTHDAY)?,
            phone: require(self.phone, PHONE)?,
        };
        let address = require(self.address, ADDRESS)?.into_details()?;
        Ok(CreateOrUpdateEnrollmentRequest {
            user_id,
            enrollment,
            address,
        })
    }
}

/// Address part of [`EnrollmentResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: i32,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub number: String,
    pub state: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
}

impl From<AddressSummary> for AddressResponse {
    fn from(value: AddressSummary) -> Self {
        let AddressSummary { id, details } = value;
        Self {
            id: id.get(),
            cep: details.cep,
            street: details.street,
            city: details.city,
            number: details.number,
            state: details.state,
            neighborhood: details.neighborhood,
            address_detail: details.address_detail,
        }
    }
}

/// Response body for `GET /enrollment`.
///
/// `address` is omitted entirely when the enrollment has none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressResponse>,
}

impl From<EnrollmentWithAddress> for EnrollmentResponse {
    fn from(value: EnrollmentWithAddress) -> Self {
        let EnrollmentWithAddress {
            id,
            details,
            address,
        } = value;
        Self {
            id: id.get(),
            name: details.name,
            cpf: details.cpf,
            birthday: details.birthday,
            phone: details.phone,
            address: address.map(AddressResponse::from),
        }
    }
}

/// JSON extractor settings for the enrollment routes.
///
/// Malformed or oversized bodies answer with a bare 400 like every other
/// write failure, once the caller is known to be authenticated.
pub fn enrollment_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "enrollment body rejected");
        InternalError::from_response(err, HttpResponse::BadRequest().finish()).into()
    })
}

/// Fetch the caller's enrollment with its address.
#[utoipa::path(
    get,
    path = "/enrollment",
    responses(
        (status = 200, description = "Enrollment with address", body = EnrollmentResponse),
        (status = 204, description = "No enrollment, or it could not be loaded"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "getEnrollment"
)]
#[get("/enrollment")]
pub async fn get_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    match state.enrollments_query.fetch_with_address(&user_id).await {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(EnrollmentResponse::from(enrollment))),
        Err(error) => {
            debug!(%user_id, code = ?error.code(), error = %error, "enrollment read collapsed to 204");
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

/// Create or update the caller's enrollment and address.
#[utoipa::path(
    post,
    path = "/enrollment",
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment stored"),
        (status = 400, description = "Malformed body, unknown postal code, or storage failure"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "upsertEnrollment"
)]
#[post("/enrollment")]
pub async fn post_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<EnrollmentRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    // Body errors are held back so anonymous callers always see 401.
    let user_id = session.require_user_id()?;
    let command = payload
        .map_err(|error| Error::invalid_request(error.to_string()))
        .and_then(|body| body.into_inner().into_command(user_id));
    let outcome = match command {
        Ok(request) => state.enrollments.create_or_update(request).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(error) => {
            debug!(%user_id, code = ?error.code(), error = %error, "enrollment write collapsed to 400");
            Ok(HttpResponse::BadRequest().finish())
        }
    }
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
