//! Persisted server configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::Paths;

/// Server-level settings persisted in the data directory.
///
/// `server_id` doubles as the JWT signing secret and the password salt, so
/// it must stay stable across restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server_id: String,
}

impl ServerConfig {
    /// Load the config from disk, creating it with a fresh server id on
    /// first run
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let path = paths.settings_path();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            Self::default()
        };

        if config.server_id.is_empty() {
            config.server_id = uuid::Uuid::new_v4().to_string();
            config.save()?;
        }

        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_path(), contents)?;
        Ok(())
    }
}
