// BoardVault Settings Engine
// Loads, saves and updates the board configuration.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BoardSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BoardSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BoardSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists `BoardSettings` as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BoardSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: BoardSettings::default(),
        }
    }

    /// Checks values that deserialize fine but make no sense for the board.
    fn validate(settings: &BoardSettings) -> Result<(), SettingsError> {
        if settings.workspace_id.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "workspace_id cannot be empty".to_string(),
            ));
        }
        if settings.page_size == 0 {
            return Err(SettingsError::InvalidValue(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults. A malformed file is an error.
    fn load(&mut self) -> Result<BoardSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            info!(path = %self.config_path, "no settings file, using defaults");
            self.settings = BoardSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: BoardSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Self::validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Updates one top-level setting by key and saves to disk.
    ///
    /// The value must deserialize into the field's type, e.g.
    /// `"page_size"` takes a number and `"database_path"` a string or null.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let new_settings: BoardSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        Self::validate(&new_settings)?;

        self.settings = new_settings;
        if let Err(e) = self.save() {
            warn!(error = %e, "settings updated in memory but not persisted");
            return Err(e);
        }
        Ok(())
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BoardSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
