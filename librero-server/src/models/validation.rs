//! Validation error types
//!
//! The Display text of each variant is the exact message sent to clients.

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Create request lacks one of title, author or year
    MissingRequired,

    /// Update request supplies none of the updatable fields
    NothingToUpdate,

    /// Delete request without an id segment
    InvalidId,

    /// Body is not valid JSON
    MalformedBody,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingRequired => "Faltan campos obligatorios: title, author, year",
            Self::NothingToUpdate => {
                "Debe enviar al menos un campo para actualizar (title, author, year)"
            }
            Self::InvalidId => "ID inválido",
            Self::MalformedBody => "Cuerpo JSON inválido",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ValidationError::MissingRequired.to_string(),
            "Faltan campos obligatorios: title, author, year"
        );
        assert_eq!(
            ValidationError::NothingToUpdate.to_string(),
            "Debe enviar al menos un campo para actualizar (title, author, year)"
        );
        assert_eq!(ValidationError::InvalidId.to_string(), "ID inválido");
        assert_eq!(
            ValidationError::MalformedBody.to_string(),
            "Cuerpo JSON inválido"
        );
    }
}
