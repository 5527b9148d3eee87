use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::Course,
    services::sync_service::{Loaded, SyncService},
};

/// In-memory course collection. Every edit builds the full post-edit
/// collection, commits it to the local store and only then replaces the
/// in-memory copy. The lock covers the local commit, so local writes land in
/// the order edits were issued; the mirror push runs after the lock is
/// released and concurrent pushes are not ordered.
pub struct CourseCatalog {
    sync: Arc<SyncService>,
    courses: Mutex<Vec<Course>>,
}

impl CourseCatalog {
    /// Loads the collection once, at startup.
    pub async fn open(sync: Arc<SyncService>) -> Result<Self, AppError> {
        let loaded = sync.load_with_source().await?;
        info!("Catalog opened with {} courses ({:?})", loaded.courses.len(), loaded.source);
        Ok(Self {
            sync,
            courses: Mutex::new(loaded.courses),
        })
    }

    pub fn sync(&self) -> &Arc<SyncService> {
        &self.sync
    }

    pub async fn list(&self) -> Vec<Course> {
        self.courses.lock().await.clone()
    }

    /// Commits `next` locally and adopts it, then mirrors it with the guard
    /// released.
    async fn persist(
        &self,
        mut courses: MutexGuard<'_, Vec<Course>>,
        next: Vec<Course>,
    ) -> Result<(), AppError> {
        self.sync.commit(&next).await?;
        *courses = next.clone();
        drop(courses);

        self.sync.mirror(&next).await;
        Ok(())
    }

    /// Replaces the course with the same id in place, or appends it. An
    /// empty id gets a fresh one. `created_by` of an existing course is kept.
    pub async fn upsert(&self, mut course: Course) -> Result<Course, AppError> {
        if course.id.is_empty() {
            course.id = Uuid::new_v4().to_string();
        }

        let courses = self.courses.lock().await;
        let mut next = courses.clone();
        match next.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => {
                course.created_by = existing.created_by;
                *existing = course.clone();
            }
            None => next.push(course.clone()),
        }

        self.persist(courses, next).await?;
        Ok(course)
    }

    /// Replaces an existing course; fails when no course has `id`. A course
    /// without an id takes `id`.
    pub async fn replace(&self, id: &str, mut course: Course) -> Result<Course, AppError> {
        if course.id.is_empty() {
            course.id = id.to_string();
        }
        if course.id != id {
            return Err(AppError::BadRequest(format!(
                "course id '{}' does not match path id '{}'",
                course.id, id
            )));
        }

        let courses = self.courses.lock().await;
        let Some(index) = courses.iter().position(|c| c.id == id) else {
            return Err(AppError::NotFound);
        };

        course.created_by = courses[index].created_by;
        let mut next = courses.clone();
        next[index] = course.clone();

        self.persist(courses, next).await?;
        Ok(course)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let courses = self.courses.lock().await;
        if !courses.iter().any(|c| c.id == id) {
            return Err(AppError::NotFound);
        }

        let next: Vec<Course> = courses.iter().filter(|c| c.id != id).cloned().collect();

        self.persist(courses, next).await?;
        info!("Deleted course {}", id);
        Ok(())
    }

    /// Appends a batch after the existing courses, keeping batch order.
    pub async fn import(&self, batch: Vec<Course>) -> Result<Vec<Course>, AppError> {
        let courses = self.courses.lock().await;

        let mut seen: HashSet<String> = courses.iter().map(|c| c.id.clone()).collect();
        let mut imported = Vec::with_capacity(batch.len());
        for mut course in batch {
            if course.id.is_empty() {
                course.id = Uuid::new_v4().to_string();
            }
            if !seen.insert(course.id.clone()) {
                return Err(AppError::Conflict(format!("duplicate course id '{}'", course.id)));
            }
            imported.push(course);
        }

        let mut next = courses.clone();
        next.extend(imported.iter().cloned());

        self.persist(courses, next).await?;
        info!("Imported {} courses", imported.len());
        Ok(imported)
    }

    /// Replaces the whole collection as given.
    pub async fn replace_all(&self, next: Vec<Course>) -> Result<Vec<Course>, AppError> {
        {
            let mut seen = HashSet::new();
            if let Some(dup) = next.iter().find(|c| !seen.insert(c.id.as_str())) {
                return Err(AppError::BadRequest(format!("duplicate course id '{}'", dup.id)));
            }
        }

        let courses = self.courses.lock().await;
        self.persist(courses, next.clone()).await?;
        Ok(next)
    }

    /// Runs a fresh load and adopts its result as the in-memory collection.
    /// The load, which may wait on the mirror, runs without the lock.
    pub async fn reload(&self) -> Result<Loaded, AppError> {
        let loaded = self.sync.load_with_source().await?;
        *self.courses.lock().await = loaded.courses.clone();
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{CourseStatus, CreatedBy, seed::seed_courses};
    use crate::remote::HttpMirror;
    use crate::storage::MemoryStore;
    use crate::storage::failing::FailingStore;

    fn course(id: &str, name: &str) -> Course {
        Course {
            id: id.to_string(),
            name: name.to_string(),
            company: "肇源".to_string(),
            start_date: "2024-06-10".to_string(),
            end_date: "2024-06-10".to_string(),
            ..Course::default()
        }
    }

    async fn open_catalog() -> CourseCatalog {
        let kv = Arc::new(MemoryStore::new());
        // Mirror stays disabled, so the client is never used.
        let mirror = Arc::new(HttpMirror::new(Duration::from_secs(1)).unwrap());
        let sync = Arc::new(SyncService::new(kv, mirror));
        CourseCatalog::open(sync).await.expect("Failed to open catalog")
    }

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_open_seeds_empty_store() {
        let catalog = open_catalog().await;
        assert_eq!(catalog.list().await, seed_courses());
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place_and_appends_new() {
        let catalog = open_catalog().await;

        let mut edited = seed_courses()[1].clone();
        edited.status = CourseStatus::Completed;
        edited.actual_attendees = 14;
        catalog.upsert(edited.clone()).await.unwrap();

        let added = catalog.upsert(course("", "新進人員訓練")).await.unwrap();
        assert!(!added.id.is_empty());

        let courses = catalog.list().await;
        assert_eq!(ids(&courses), vec!["1", "2", "3", added.id.as_str()]);
        assert_eq!(courses[1], edited);

        let persisted = catalog.sync().records().read_raw().await.unwrap();
        assert_eq!(persisted, Some(courses));
    }

    #[tokio::test]
    async fn test_edit_keeps_creator() {
        let catalog = open_catalog().await;

        let mut edited = seed_courses()[2].clone();
        edited.created_by = CreatedBy::Hr;
        let stored = catalog.replace("3", edited).await.unwrap();
        assert_eq!(stored.created_by, CreatedBy::User);

        let mut edited = seed_courses()[0].clone();
        edited.created_by = CreatedBy::User;
        let stored = catalog.upsert(edited).await.unwrap();
        assert_eq!(stored.created_by, CreatedBy::Hr);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_not_found() {
        let catalog = open_catalog().await;
        let result = catalog.replace("nope", course("nope", "不存在")).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_replace_rejects_mismatched_id() {
        let catalog = open_catalog().await;
        let result = catalog.replace("1", course("2", "錯置")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_replace_without_id_takes_path_id() {
        let catalog = open_catalog().await;
        let stored = catalog.replace("2", course("", "改名")).await.unwrap();
        assert_eq!(stored.id, "2");

        let courses = catalog.list().await;
        assert_eq!(ids(&courses), vec!["1", "2", "3"]);
        assert_eq!(courses[1].name, "改名");
    }

    #[tokio::test]
    async fn test_delete_persists_removal() {
        let catalog = open_catalog().await;
        catalog.delete("2").await.unwrap();

        assert_eq!(ids(&catalog.list().await), vec!["1", "3"]);
        let persisted = catalog.sync().records().read_raw().await.unwrap().unwrap();
        assert_eq!(ids(&persisted), vec!["1", "3"]);

        assert!(matches!(catalog.delete("2").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_deleting_everything_does_not_reseed() {
        let catalog = open_catalog().await;
        for id in ["1", "2", "3"] {
            catalog.delete(id).await.unwrap();
        }

        let reloaded = catalog.reload().await.unwrap();
        assert!(reloaded.courses.is_empty());
        assert!(catalog.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_import_appends_batch() {
        let catalog = open_catalog().await;
        let imported = catalog
            .import(vec![course("a", "甲"), course("", "乙")])
            .await
            .unwrap();
        assert_eq!(imported.len(), 2);

        let courses = catalog.list().await;
        assert_eq!(courses.len(), 5);
        assert_eq!(courses[3].id, "a");
        assert_eq!(courses[4].name, "乙");
    }

    #[tokio::test]
    async fn test_import_rejects_colliding_ids() {
        let catalog = open_catalog().await;

        let result = catalog.import(vec![course("1", "重複")]).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let result = catalog.import(vec![course("z", "甲"), course("z", "乙")]).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        assert_eq!(catalog.list().await, seed_courses());
    }

    #[tokio::test]
    async fn test_replace_all_keeps_given_order() {
        let catalog = open_catalog().await;
        let next = vec![course("c", "丙"), course("a", "甲"), course("b", "乙")];
        catalog.replace_all(next.clone()).await.unwrap();

        assert_eq!(catalog.list().await, next);
        assert_eq!(catalog.reload().await.unwrap().courses, next);
    }

    #[tokio::test]
    async fn test_replace_all_rejects_duplicates() {
        let catalog = open_catalog().await;
        let result = catalog.replace_all(vec![course("a", "甲"), course("a", "乙")]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(catalog.list().await, seed_courses());
    }

    #[tokio::test]
    async fn test_failed_local_write_leaves_list_unchanged() {
        let kv = Arc::new(FailingStore::new());
        let mirror = Arc::new(HttpMirror::new(Duration::from_secs(1)).unwrap());
        let sync = Arc::new(SyncService::new(kv.clone(), mirror));
        let catalog = CourseCatalog::open(sync).await.expect("Failed to open catalog");
        kv.fail_writes(true);

        let result = catalog.upsert(course("", "寫不進去")).await;
        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(matches!(catalog.delete("1").await, Err(AppError::Database(_))));
        assert!(matches!(
            catalog.import(vec![course("a", "甲")]).await,
            Err(AppError::Database(_))
        ));

        assert_eq!(catalog.list().await, seed_courses());
        kv.fail_writes(false);
        assert_eq!(catalog.sync().records().read_raw().await.unwrap(), Some(seed_courses()));
    }
}
