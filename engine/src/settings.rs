use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{CollisionPolicy, WrapMode};

/// Everything a session is configured with, resolved once at start.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub field_width: i32,
    pub field_height: i32,
    pub wrap_mode: WrapMode,
    pub collision_policy: CollisionPolicy,
    /// Explicit seed for deterministic replay; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 15,
            wrap_mode: WrapMode::Toroidal,
            collision_policy: CollisionPolicy::Terminate,
            seed: None,
            tick_interval_ms: 150,
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.field_width) {
            return Err("Field width must be between 1 and 100".to_string());
        }
        if !(1..=100).contains(&self.field_height) {
            return Err("Field height must be between 1 and 100".to_string());
        }
        if self.field_width * self.field_height < 2 {
            return Err("Field must have at least two cells".to_string());
        }
        if !(20..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        Ok(())
    }

    /// Loads settings from a YAML file. A missing file is not an error;
    /// the caller falls back to defaults.
    pub fn load_yaml_file(path: &Path) -> Result<Option<Self>, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("Failed to read settings file: {}", err)),
        };

        let settings: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse settings file: {}", e))?;
        settings
            .validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;
        Ok(Some(settings))
    }

    pub fn save_yaml_file(&self, path: &Path) -> Result<(), String> {
        self.validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;
        let content = serde_yaml_ng::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }
}
