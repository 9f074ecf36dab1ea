//! Core logic of logging in and out.
//!
//! A session is stored only when the backend explicitly grants access; any
//! other outcome leaves the store untouched and yields a message for the
//! login form.

use chrono::{DateTime, Utc};
use sigep_adapters::{call, endpoints, models::LoginRequest, models::LoginResponse, ApiRequest, RemoteGateway};
use tracing::{info, warn};

use super::models::{Credentials, Session};
use super::store::SessionStore;
use crate::errors::ConsoleError;

pub const LOGIN_FALLBACK: &str = "Error de conexión o credenciales incorrectas";
pub const LOGIN_SILENT_REJECTION: &str = "Credenciales incorrectas.";

pub async fn login(
    gateway: &dyn RemoteGateway,
    store: &dyn SessionStore,
    credentials: Credentials,
    now: DateTime<Utc>,
) -> Result<Session, ConsoleError> {
    if credentials.username.trim().is_empty() {
        return Err(ConsoleError::validation("Ingresa tu usuario"));
    }
    if credentials.password.is_empty() {
        return Err(ConsoleError::validation("Ingresa tu contraseña"));
    }

    let request = ApiRequest::post(
        endpoints::LOGIN,
        &LoginRequest {
            username: credentials.username.trim().to_string(),
            password: credentials.password,
        },
    )?;

    let response: LoginResponse = call(gateway, request).await?;
    if !response.acceso_concedido {
        warn!(username = %credentials.username, "login answered without access");
        return Err(ConsoleError::AccessDenied);
    }

    let session = Session::new(response, now);
    store.establish(&session)?;
    info!(username = session.username(), roles = ?session.roles(), "session established");
    Ok(session)
}

pub fn logout(store: &dyn SessionStore) -> Result<(), ConsoleError> {
    store.clear()?;
    info!("session cleared");
    Ok(())
}

/// Text the login form shows for a failed attempt.
pub fn login_failure_message(err: &ConsoleError) -> String {
    match err {
        ConsoleError::Gateway(gateway) => match gateway.server_message() {
            Some(message) => message.to_string(),
            None if gateway.is_network() => LOGIN_FALLBACK.to_string(),
            None => match gateway {
                sigep_adapters::GatewayError::Validation { .. }
                | sigep_adapters::GatewayError::Unauthorized { .. } => {
                    LOGIN_SILENT_REJECTION.to_string()
                }
                _ => LOGIN_FALLBACK.to_string(),
            },
        },
        other => other.to_string(),
    }
}
