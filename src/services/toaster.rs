//! Transient, auto-dismissing user notices.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Shown when the clipboard holds nothing that looks like a link.
pub const NO_VALID_LINK: &str = "No valid link in clipboard!";
/// Shown after a url was replaced from the clipboard.
pub const LINK_UPDATED: &str = "Link updated from clipboard!";
/// Shown when the clipboard could not be read.
pub const CLIPBOARD_ERROR: &str = "Clipboard access error!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Holds at most one notice; a newer one replaces the older.
#[derive(Debug)]
pub struct Toaster {
    duration: Duration,
    current: Option<(Toast, Instant)>,
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn show(&mut self, message: &str, kind: ToastKind) {
        self.show_at(message, kind, Instant::now());
    }

    pub fn show_at(&mut self, message: &str, kind: ToastKind, now: Instant) {
        self.current = Some((
            Toast {
                message: message.to_string(),
                kind,
            },
            now,
        ));
    }

    /// The visible notice, if it has not expired yet.
    pub fn current(&self) -> Option<&Toast> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Toast> {
        match &self.current {
            Some((toast, shown)) if now.saturating_duration_since(*shown) < self.duration => {
                Some(toast)
            }
            _ => None,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
