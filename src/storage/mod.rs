#[cfg(test)]
pub(crate) mod failing;
pub mod memory;
pub mod records;
pub mod settings;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::AppError;

pub use memory::MemoryStore;
pub use records::CourseStore;
pub use settings::SettingsStore;
pub use sqlite::SqliteStore;

/// Slot holding the JSON-encoded course collection.
pub const COURSES_KEY: &str = "hr_training_data";
/// Slot holding the JSON-encoded settings record.
pub const SETTINGS_KEY: &str = "hr_training_settings";

/// Durable string slots addressed by key. Each `write` replaces the whole
/// value; there is no versioning and the last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
}
