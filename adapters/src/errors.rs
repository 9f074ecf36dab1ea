//! Custom error types specific to the `adapters` crate.
//!
//! Every failed backend call is reported as one of a small set of
//! categories, so screens can decide between a global connectivity toast,
//! a verbatim server message, or a re-login prompt.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// No HTTP response arrived at all.
    #[error("Error de conexión: El servidor no responde ({0})")]
    Network(String),

    #[error("{}", message.as_deref().unwrap_or("Solicitud rechazada por el servidor"))]
    Validation { message: Option<String> },

    #[error("{}", message.as_deref().unwrap_or("No autorizado"))]
    Unauthorized { message: Option<String> },

    #[error("Error del servidor (HTTP {status})")]
    Server { status: u16, message: Option<String> },

    #[error("Respuesta inesperada de {path}: {reason}")]
    MalformedResponse { path: String, reason: String },

    #[error("No se pudo codificar la solicitud: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Dirección inválida: {0}")]
    InvalidAddress(String),
}

impl GatewayError {
    /// The message the server attached to the failure, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Validation { message }
            | GatewayError::Unauthorized { message }
            | GatewayError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }

    /// Categorizes a non-success HTTP status.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 | 409 | 422 => GatewayError::Validation { message },
            401 | 403 => GatewayError::Unauthorized { message },
            _ => GatewayError::Server { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_categories() {
        assert!(matches!(
            GatewayError::from_status(400, None),
            GatewayError::Validation { .. }
        ));
        assert!(matches!(
            GatewayError::from_status(422, Some("x".into())),
            GatewayError::Validation { .. }
        ));
        assert!(GatewayError::from_status(401, None).is_unauthorized());
        assert!(GatewayError::from_status(403, None).is_unauthorized());
        assert!(matches!(
            GatewayError::from_status(500, None),
            GatewayError::Server { status: 500, .. }
        ));
        assert!(matches!(
            GatewayError::from_status(404, None),
            GatewayError::Server { status: 404, .. }
        ));
    }

    #[test]
    fn server_message_is_exposed_verbatim() {
        let err = GatewayError::from_status(409, Some("Cédula duplicada".into()));
        assert_eq!(err.server_message(), Some("Cédula duplicada"));
        assert_eq!(err.to_string(), "Cédula duplicada");
        assert_eq!(GatewayError::Network("refused".into()).server_message(), None);
    }
}
