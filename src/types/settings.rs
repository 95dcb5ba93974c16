use serde::{Deserialize, Serialize};

/// Workspace used when no configuration file overrides it.
pub const DEFAULT_WORKSPACE_ID: &str = "boardvault-demo";

/// Number of rows shown per table page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// How long a toast stays visible.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Top-level application configuration.
///
/// Passed explicitly to the store and board at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardSettings {
    /// Scopes every record to one logical tenant.
    pub workspace_id: String,
    pub page_size: usize,
    pub toast_duration_ms: u64,
    pub anonymous_auth: bool,
    /// SQLite file path. `None` means `<data dir>/boardvault.db`.
    pub database_path: Option<String>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            workspace_id: DEFAULT_WORKSPACE_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            anonymous_auth: true,
            database_path: None,
        }
    }
}
