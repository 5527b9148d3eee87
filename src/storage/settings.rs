use std::sync::Arc;

use tracing::warn;

use super::{KeyValueStore, SETTINGS_KEY};
use crate::{error::AppError, models::Settings};

#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Persisted settings, or the default when absent or unreadable.
    pub async fn get(&self) -> Settings {
        let raw = match self.kv.read(SETTINGS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Settings::default(),
            Err(e) => {
                warn!("Failed to read settings, using defaults: {}", e);
                return Settings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Stored settings are not decodable, using defaults: {}", e);
            Settings::default()
        })
    }

    pub async fn put(&self, settings: &Settings) -> Result<(), AppError> {
        let raw = serde_json::to_string(settings)?;
        self.kv.write(SETTINGS_KEY, &raw).await
    }
}
