use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Webhook the course collection is mirrored to. Empty or blank disables the mirror.
    #[serde(rename = "googleScriptUrl")]
    pub mirror_url: String,
}

impl Settings {
    pub fn new(mirror_url: impl Into<String>) -> Self {
        Self {
            mirror_url: mirror_url.into(),
        }
    }

    pub fn mirror_enabled(&self) -> bool {
        !self.mirror_url.trim().is_empty()
    }
}
