//! Guards that protect screens from stale or missing sessions.
//!
//! The role checks screens perform afterwards are display mirrors only; the
//! backend remains the enforcement point, which is why an `Unauthorized`
//! answer always wins over whatever the local session claims.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use super::models::Session;
use super::store::SessionStore;
use crate::errors::ConsoleError;

/// Returns the stored session if it is still inside its validity window.
///
/// An expired session is removed before the error is returned.
pub fn require_session(
    store: &dyn SessionStore,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<Session, ConsoleError> {
    let session = store.current()?.ok_or(ConsoleError::NoSession)?;
    if !session.is_valid_at(now, ttl) {
        info!(established_at = %session.established_at, "stored session expired");
        store.clear()?;
        return Err(ConsoleError::SessionExpired);
    }
    Ok(session)
}

/// Drops the stored session when the backend rejected the caller's identity.
pub fn enforce<T>(store: &dyn SessionStore, result: Result<T, ConsoleError>) -> Result<T, ConsoleError> {
    if let Err(err) = &result {
        if matches!(err, ConsoleError::Gateway(gateway) if gateway.is_unauthorized()) {
            warn!("backend rejected the session, clearing it");
            if let Err(clear_err) = store.clear() {
                warn!("could not clear session: {clear_err}");
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::session_with;
    use crate::auth::store::MemorySessionStore;
    use sigep_adapters::GatewayError;

    #[test]
    fn missing_session_requires_login() {
        let store = MemorySessionStore::new();
        let err = require_session(&store, Duration::minutes(5), Utc::now()).unwrap_err();
        assert!(matches!(err, ConsoleError::NoSession));
        assert!(err.requires_login());
    }

    #[test]
    fn expired_session_is_cleared() {
        let session = session_with(&["ROLE_TH"], Some(2));
        let later = session.established_at + Duration::minutes(10);
        let store = MemorySessionStore::with(session);

        let err = require_session(&store, Duration::minutes(5), later).unwrap_err();
        assert!(matches!(err, ConsoleError::SessionExpired));
        assert_eq!(store.current().unwrap(), None);
    }

    #[test]
    fn fresh_session_passes() {
        let session = session_with(&["ROLE_TH"], Some(2));
        let now = session.established_at + Duration::minutes(1);
        let store = MemorySessionStore::with(session.clone());
        assert_eq!(require_session(&store, Duration::minutes(5), now).unwrap(), session);
    }

    #[test]
    fn unauthorized_answer_clears_session() {
        let store = MemorySessionStore::with(session_with(&["ROLE_TH"], Some(2)));
        let result: Result<(), _> = enforce(
            &store,
            Err(GatewayError::from_status(401, None).into()),
        );
        assert!(result.is_err());
        assert_eq!(store.current().unwrap(), None);
    }

    #[test]
    fn other_failures_keep_session() {
        let store = MemorySessionStore::with(session_with(&["ROLE_TH"], Some(2)));
        let result: Result<(), _> = enforce(
            &store,
            Err(GatewayError::from_status(500, None).into()),
        );
        assert!(result.is_err());
        assert!(store.current().unwrap().is_some());
    }
}
