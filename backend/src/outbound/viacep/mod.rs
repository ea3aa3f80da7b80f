//! ViaCEP outbound adapter.
//!
//! Implements the `PostalCodeLookup` port with one HTTP GET per lookup
//! against `{base}/{cep}/json/`.

mod dto;
mod http_lookup;

pub use http_lookup::{DEFAULT_VIACEP_BASE_URL, ViaCepLookup};
