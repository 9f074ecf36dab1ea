//! Screen controllers, one per business object.
//!
//! Every controller follows the same cycle: activation fetches reference
//! data and the primary collection concurrently, the collection is rendered,
//! and each user action validates locally, submits through the gateway, and
//! re-runs the activation on success. Nothing is shown optimistically.

pub mod activation;
pub mod attendance;
pub mod inbox;
pub mod my_requests;
pub mod personnel;
pub mod users;

use std::sync::Arc;

use sigep_adapters::RemoteGateway;
use tracing::warn;

pub use activation::CancellationToken;

use crate::auth::Session;
use crate::errors::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// A message in the initiating screen's own notification area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// What every screen receives when it is activated.
#[derive(Clone)]
pub struct ScreenContext {
    pub gateway: Arc<dyn RemoteGateway>,
    pub session: Session,
    pub activation: CancellationToken,
}

impl ScreenContext {
    pub fn new(gateway: Arc<dyn RemoteGateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            activation: CancellationToken::new(),
        }
    }

    /// Ties the screen to an activation token owned by the caller.
    pub fn with_activation(mut self, activation: CancellationToken) -> Self {
        self.activation = activation;
        self
    }

    pub fn gateway(&self) -> &dyn RemoteGateway {
        self.gateway.as_ref()
    }
}

/// Notification area shared by the controllers.
#[derive(Debug, Default, Clone)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, level: Level, text: impl Into<String>) {
        self.items.push(Notice::new(level, text));
    }

    pub fn all(&self) -> &[Notice] {
        &self.items
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }

    /// Reports a failed action and hands the error back to the caller.
    ///
    /// Local validation shows as a warning; cancelled activations show nothing.
    pub fn fail(&mut self, err: ConsoleError, fallback: &str) -> ConsoleError {
        match &err {
            ConsoleError::Cancelled => {}
            ConsoleError::Validation(message) => self.push(Level::Warning, message.clone()),
            _ => {
                warn!("{fallback}: {err}");
                self.push(Level::Error, err.user_message(fallback));
            }
        }
        err
    }
}
