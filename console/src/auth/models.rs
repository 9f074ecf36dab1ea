//! Data structures for authentication-related entities.
//!
//! This module defines the login credentials and the session record created
//! from a granted login response.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sigep_adapters::models::{LoginResponse, MenuEntry};

use crate::errors::ConsoleError;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_JEFE: &str = "ROLE_JEFE";
pub const ROLE_TH: &str = "ROLE_TH";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The authenticated identity, exactly as the backend granted it.
///
/// Replaced wholesale on re-login; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub established_at: DateTime<Utc>,
    pub payload: LoginResponse,
}

impl Session {
    pub fn new(payload: LoginResponse, established_at: DateTime<Utc>) -> Self {
        Self {
            established_at,
            payload,
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.payload.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.payload.roles.iter().any(|r| r == role)
    }

    pub fn menus(&self) -> &[MenuEntry] {
        &self.payload.menus
    }

    pub fn username(&self) -> &str {
        self.payload.username.as_deref().unwrap_or("Usuario")
    }

    /// Employee the session acts for. There is no default identity.
    pub fn employee_id(&self) -> Result<i64, ConsoleError> {
        self.payload.id_empleado.ok_or_else(|| {
            ConsoleError::validation("La sesión no tiene un empleado asociado")
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.established_at && now - self.established_at < ttl
    }
}

#[cfg(test)]
pub(crate) fn session_with(roles: &[&str], id_empleado: Option<i64>) -> Session {
    let payload = LoginResponse {
        acceso_concedido: true,
        mensaje: Some("Bienvenido".into()),
        id_empleado,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        menus: Vec::new(),
        username: Some("jperez".into()),
        extra: Default::default(),
    };
    Session::new(payload, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_window() {
        let session = session_with(&[ROLE_JEFE], Some(3));
        let start = session.established_at;
        let ttl = Duration::minutes(60);

        assert!(session.is_valid_at(start, ttl));
        assert!(session.is_valid_at(start + Duration::minutes(59), ttl));
        assert!(!session.is_valid_at(start + Duration::minutes(60), ttl));
        assert!(!session.is_valid_at(start - Duration::minutes(1), ttl));
    }

    #[test]
    fn missing_employee_is_an_error_not_a_default() {
        assert!(session_with(&[], None).employee_id().is_err());
        assert_eq!(session_with(&[], Some(8)).employee_id().unwrap(), 8);
    }

    #[test]
    fn password_is_not_debug_printed() {
        let credentials = Credentials {
            username: "jperez".into(),
            password: "secreto".into(),
        };
        assert!(!format!("{credentials:?}").contains("secreto"));
    }
}
