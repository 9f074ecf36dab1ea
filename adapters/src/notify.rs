//! Global failure-notification hook used by the gateway.
//!
//! When a call gets no response at all, the gateway raises exactly one
//! user-visible notification through a `Notifier`, independent of whatever
//! the initiating screen reports. The gateway logs the failure itself.

use std::io::{self, Stderr, Write};
use std::sync::Mutex;

pub const CONNECTIVITY_MESSAGE: &str = "Error de conexión: El servidor no responde";

pub trait Notifier: Send + Sync {
    fn connectivity_lost(&self, message: &str);
}

/// Writes one toast line per notification.
#[derive(Debug)]
pub struct WriterNotifier<W> {
    out: Mutex<W>,
}

pub type StderrNotifier = WriterNotifier<Stderr>;

impl<W: Write> WriterNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for StderrNotifier {
    fn default() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> Notifier for WriterNotifier<W> {
    fn connectivity_lost(&self, message: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Nowhere left to report a failed toast write.
        let _ = writeln!(out, "✖ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_notification_is_one_line() {
        let notifier = WriterNotifier::new(Vec::new());
        notifier.connectivity_lost(CONNECTIVITY_MESSAGE);
        notifier.connectivity_lost(CONNECTIVITY_MESSAGE);

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(
            written,
            format!("✖ {CONNECTIVITY_MESSAGE}\n✖ {CONNECTIVITY_MESSAGE}\n")
        );
    }
}
