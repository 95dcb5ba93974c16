//! App Core for BoardVault.
//!
//! Owns the configuration, identity provider, clipboard and board, and keeps
//! the board subscribed to its collection only while somebody is signed in.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};

use crate::database::Database;
use crate::managers::record_board::RecordBoard;
use crate::platform;
use crate::services::clipboard::MemoryClipboard;
use crate::services::identity::{AnonymousIdentity, IdentityProvider};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::store::SqliteRecordStore;
use crate::types::errors::AuthError;
use crate::types::identity::UserHandle;
use crate::types::settings::BoardSettings;

/// Board type the app runs.
pub type Board = RecordBoard<SqliteRecordStore, MemoryClipboard>;

/// Central application struct.
pub struct App {
    /// Changes made through the engine are persisted and picked up on the next start.
    pub settings_engine: SettingsEngine,
    pub identity: AnonymousIdentity,
    /// Login/logout feed from `identity`, followed by [`App::sync_auth`].
    pub auth: watch::Receiver<Option<UserHandle>>,
    pub clipboard: Arc<MemoryClipboard>,
    pub board: Board,
}

impl App {
    /// Loads settings and opens the database they name (or `<data dir>/boardvault.db`).
    pub fn new(mut settings_engine: SettingsEngine) -> anyhow::Result<Self> {
        let settings = settings_engine.load().context("loading settings")?;
        let path = match &settings.database_path {
            Some(p) => PathBuf::from(p),
            None => platform::get_data_dir().join("boardvault.db"),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating data directory {}", parent.display()))?;
        }
        let db = Database::open(&path)
            .with_context(|| format!("opening database {}", path.display()))?;
        info!(path = %path.display(), "database opened");
        Ok(Self::with_database(settings_engine, db))
    }

    /// Builds the app over an already opened database, using the engine's
    /// current settings.
    pub fn with_database(settings_engine: SettingsEngine, db: Database) -> Self {
        let settings = settings_engine.get_settings().clone();
        let store = Arc::new(SqliteRecordStore::new(db));
        let clipboard = Arc::new(MemoryClipboard::new());
        let board = RecordBoard::new(store, clipboard.clone(), &settings);
        let identity = AnonymousIdentity::new(settings.anonymous_auth);
        let auth = identity.watch();

        Self {
            settings_engine,
            identity,
            auth,
            clipboard,
            board,
        }
    }

    /// Signs in anonymously and attaches the board. A failed sign-in is
    /// logged and leaves the board detached and empty.
    pub async fn startup(&mut self) {
        if let Err(e) = self.sign_in().await {
            error!(error = %e, "auth error");
        }
    }

    pub async fn sign_in(&mut self) -> Result<UserHandle, AuthError> {
        let result = self.identity.sign_in_anonymously().await;
        self.sync_auth();
        result
    }

    /// Applies the latest auth state from the identity feed: subscribed while
    /// signed in, detached otherwise.
    pub fn sync_auth(&mut self) {
        let user = self.auth.borrow_and_update().clone();
        match user {
            Some(user) if !self.board.is_attached() => {
                info!(uid = %user.uid, "user signed in");
                if let Err(e) = self.board.attach() {
                    error!(error = %e, "failed to subscribe to records");
                }
            }
            None if self.board.is_attached() => self.board.detach(),
            _ => {}
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        self.settings_engine.get_settings()
    }

    pub fn current_user(&self) -> Option<UserHandle> {
        self.identity.current_user()
    }

    pub fn sign_out(&mut self) {
        self.identity.sign_out();
        self.sync_auth();
    }
}
