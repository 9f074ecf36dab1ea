//! Global application error types.
//!
//! This module defines the error type shared by the session layer, the
//! screens and the CLI, and the rule that turns any failure into the text a
//! user sees.

use sigep_adapters::GatewayError;
use thiserror::Error;

pub const REAUTH_MESSAGE: &str = "Sesión expirada, vuelve a iniciar sesión";

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Rejected locally before any call was made.
    #[error("{0}")]
    Validation(String),

    #[error("Acceso denegado. Revisa tus credenciales.")]
    AccessDenied,

    #[error("No hay una sesión activa, inicia sesión con `sigep login`")]
    NoSession,

    #[error("{REAUTH_MESSAGE}")]
    SessionExpired,

    #[error("No se pudo acceder al almacenamiento de sesión: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Sesión almacenada ilegible: {0}")]
    CorruptSession(#[from] serde_json::Error),

    #[error("Archivo adjunto inválido: {0}")]
    Attachment(String),

    /// The activation that issued the call was cancelled before it resolved.
    #[error("Operación cancelada")]
    Cancelled,

    #[error("Configuración inválida: {0}")]
    Config(String),
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    /// Text for the initiating screen: the server's words when it sent any,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Gateway(err) if err.is_unauthorized() => REAUTH_MESSAGE.to_string(),
            ConsoleError::Gateway(err) => err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            ConsoleError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn requires_login(&self) -> bool {
        match self {
            ConsoleError::NoSession | ConsoleError::SessionExpired => true,
            ConsoleError::Gateway(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ConsoleError::from(GatewayError::from_status(
            422,
            Some("El código DIR-003 ya existe".into()),
        ));
        assert_eq!(err.user_message("Error al procesar."), "El código DIR-003 ya existe");
    }

    #[test]
    fn fallback_when_server_is_silent() {
        let err = ConsoleError::from(GatewayError::from_status(500, None));
        assert_eq!(err.user_message("Error al procesar."), "Error al procesar.");

        let err = ConsoleError::from(GatewayError::Network("refused".into()));
        assert_eq!(err.user_message("Error al procesar."), "Error al procesar.");
    }

    #[test]
    fn unauthorized_asks_for_login() {
        let err = ConsoleError::from(GatewayError::from_status(401, Some("JWT expirado".into())));
        assert!(err.requires_login());
        assert_eq!(err.user_message("x"), REAUTH_MESSAGE);
    }
}
