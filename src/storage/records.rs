use std::sync::Arc;

use tracing::{info, warn};

use super::{COURSES_KEY, KeyValueStore};
use crate::{
    error::AppError,
    models::{Course, seed::seed_courses},
};

/// The local copy of the course collection.
#[derive(Clone)]
pub struct CourseStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CourseStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// `None` when the slot was never written. A slot that no longer decodes
    /// is reported the same way so the caller reseeds instead of failing.
    pub async fn read_raw(&self) -> Result<Option<Vec<Course>>, AppError> {
        let Some(raw) = self.kv.read(COURSES_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Course>>(&raw) {
            Ok(courses) => Ok(Some(courses)),
            Err(e) => {
                warn!("Local course data is not decodable, treating as absent: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn write_raw(&self, courses: &[Course]) -> Result<(), AppError> {
        let raw = serde_json::to_string(courses)?;
        self.kv.write(COURSES_KEY, &raw).await
    }

    pub async fn seed(&self) -> Result<Vec<Course>, AppError> {
        let courses = seed_courses();
        self.write_raw(&courses).await?;
        info!("Seeded local store with {} example courses", courses.len());
        Ok(courses)
    }
}
