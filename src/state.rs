use std::sync::Arc;

use crate::services::CourseCatalog;
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: Arc<CourseCatalog>,
}
