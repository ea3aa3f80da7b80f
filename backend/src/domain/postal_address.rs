//! Normalised result of a postal-code (CEP) lookup.

/// Address data resolved from a postal code.
///
/// Every field is optional because the upstream directory omits fields it
/// does not know; absent fields stay absent all the way to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    /// Street name (`logradouro`).
    pub street: Option<String>,
    /// Complement such as a block range (`complemento`).
    pub complement: Option<String>,
    /// Neighbourhood (`bairro`).
    pub neighborhood: Option<String>,
    /// City (`cidade`).
    pub city: Option<String>,
    /// Two-letter federative unit (`uf`).
    pub state: Option<String>,
}
