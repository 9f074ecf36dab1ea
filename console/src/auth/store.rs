//! Persistence of the session record between invocations.
//!
//! The file store keeps one JSON document, replaced whole on every login and
//! removed on logout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::models::Session;
use crate::errors::ConsoleError;

pub trait SessionStore: Send + Sync {
    /// Replaces any stored session with `session`.
    fn establish(&self, session: &Session) -> Result<(), ConsoleError>;

    fn current(&self) -> Result<Option<Session>, ConsoleError>;

    fn clear(&self) -> Result<(), ConsoleError>;
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn establish(&self, session: &Session) -> Result<(), ConsoleError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_vec_pretty(session)?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, contents)?;
        restrict_permissions(&staging)?;
        fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), "session stored");
        Ok(())
    }

    fn current(&self) -> Result<Option<Session>, ConsoleError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<(), ConsoleError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, ConsoleError> {
        self.session
            .lock()
            .map_err(|_| ConsoleError::Storage(std::io::Error::other("session lock poisoned")))
    }
}

impl SessionStore for MemorySessionStore {
    fn establish(&self, session: &Session) -> Result<(), ConsoleError> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn current(&self) -> Result<Option<Session>, ConsoleError> {
        Ok(self.slot()?.clone())
    }

    fn clear(&self) -> Result<(), ConsoleError> {
        *self.slot()? = None;
        Ok(())
    }
}
