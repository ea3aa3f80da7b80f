//! Public postal-code lookup handler.
//!
//! ```text
//! GET /cep?cep=01001000
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::PostalAddress;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /cep`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CepQuery {
    /// Postal code to resolve. Passed to the directory unvalidated.
    #[param(example = "01001000")]
    pub cep: Option<String>,
}

/// Normalised address returned by `GET /cep`.
///
/// Fields absent upstream are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CepAddressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Sé")]
    pub bairro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "São Paulo")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "SP")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "lado ímpar")]
    pub complemento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Praça da Sé")]
    pub logradouro: Option<String>,
}

impl From<PostalAddress> for CepAddressResponse {
    fn from(value: PostalAddress) -> Self {
        Self {
            bairro: value.neighborhood,
            cidade: value.city,
            uf: value.state,
            complemento: value.complement,
            logradouro: value.street,
        }
    }
}

/// Resolve a Brazilian postal code to its address.
///
/// Any failure, including a missing `cep` parameter, answers with a bare 400.
#[utoipa::path(
    get,
    path = "/cep",
    params(CepQuery),
    responses(
        (status = 200, description = "Address for the postal code", body = CepAddressResponse),
        (status = 400, description = "Missing, unknown, or unresolvable postal code")
    ),
    tags = ["cep"],
    operation_id = "lookupCep",
    security([])
)]
#[get("/cep")]
pub async fn get_cep(
    state: web::Data<HttpState>,
    query: web::Query<CepQuery>,
) -> HttpResponse {
    let Some(cep) = query.into_inner().cep else {
        debug!("postal-code lookup without cep parameter");
        return HttpResponse::BadRequest().finish();
    };
    match state.postal_codes.lookup(&cep).await {
        Ok(address) => HttpResponse::Ok().json(CepAddressResponse::from(address)),
        Err(error) => {
            debug!(%cep, error = %error, "postal-code lookup collapsed to 400");
            HttpResponse::BadRequest().finish()
        }
    }
}
