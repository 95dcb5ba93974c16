//! Clipboard contract and an in-process implementation.

use std::future::Future;
use std::sync::Mutex;

use crate::types::errors::ClipboardError;

/// Asynchronous read access to the text clipboard.
pub trait Clipboard {
    /// Returns the clipboard text, or `None` when the clipboard holds no text.
    fn read_text(&self) -> impl Future<Output = Result<Option<String>, ClipboardError>>;
}

#[derive(Debug, Clone)]
enum ClipboardState {
    Text(Option<String>),
    Denied(String),
    Unsupported,
}

/// Clipboard whose contents are set by the host (the RPC client or a test).
#[derive(Debug)]
pub struct MemoryClipboard {
    state: Mutex<ClipboardState>,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    /// An empty clipboard.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ClipboardState::Text(None)),
        }
    }

    pub fn set_text(&self, text: Option<String>) {
        self.replace(ClipboardState::Text(text));
    }

    /// Makes the next reads fail with `PermissionDenied`.
    pub fn deny(&self, reason: &str) {
        self.replace(ClipboardState::Denied(reason.to_string()));
    }

    /// Makes the next reads fail with `Unsupported`.
    pub fn set_unsupported(&self) {
        self.replace(ClipboardState::Unsupported);
    }

    fn replace(&self, next: ClipboardState) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        *state = next;
    }
}

impl Clipboard for MemoryClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let state = self
            .state
            .lock()
            .map_err(|e| ClipboardError::PermissionDenied(e.to_string()))?
            .clone();
        match state {
            ClipboardState::Text(text) => Ok(text),
            ClipboardState::Denied(reason) => Err(ClipboardError::PermissionDenied(reason)),
            ClipboardState::Unsupported => Err(ClipboardError::Unsupported),
        }
    }
}
