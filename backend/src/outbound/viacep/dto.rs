//! DTOs for decoding ViaCEP JSON responses.
//!
//! ViaCEP answers unknown codes with HTTP 200 and `{"erro": true}` (older
//! deployments send the string `"true"`), so the flag is checked before the
//! address fields are trusted. Fields not listed here are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::PostalAddress;

#[derive(Debug, Deserialize)]
pub(super) struct ViaCepAddressDto {
    pub(super) logradouro: Option<String>,
    pub(super) complemento: Option<String>,
    pub(super) bairro: Option<String>,
    pub(super) localidade: Option<String>,
    pub(super) uf: Option<String>,
    pub(super) erro: Option<Value>,
}

impl ViaCepAddressDto {
    /// Whether the upstream marked the code as nonexistent.
    pub(super) fn is_flagged(&self) -> bool {
        self.erro.as_ref().is_some_and(is_truthy)
    }

    /// Map upstream field names onto the domain shape.
    ///
    /// `localidade` becomes the city; every other field keeps its meaning and
    /// the `erro` flag is dropped.
    pub(super) fn into_domain(self) -> PostalAddress {
        PostalAddress {
            street: self.logradouro,
            complement: self.complemento,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        }
    }
}

/// JSON truthiness: `null`, `false`, zero and `""` are falsy.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
