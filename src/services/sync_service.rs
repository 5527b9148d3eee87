use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::AppError,
    models::{Course, Settings},
    remote::MirrorClient,
    storage::{CourseStore, KeyValueStore, SettingsStore},
};

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    Remote,
    Local,
    Seed,
}

#[derive(Debug)]
pub struct Loaded {
    pub courses: Vec<Course>,
    pub source: LoadSource,
}

/// Local-first persistence of the course collection. The local store is
/// always written and is the fallback for every read; the mirror at the
/// configured URL is consulted first on load and written after the local
/// store on save, and its failures are logged and dropped.
pub struct SyncService {
    settings: SettingsStore,
    records: CourseStore,
    mirror: Arc<dyn MirrorClient>,
}

impl SyncService {
    pub fn new(kv: Arc<dyn KeyValueStore>, mirror: Arc<dyn MirrorClient>) -> Self {
        Self {
            settings: SettingsStore::new(kv.clone()),
            records: CourseStore::new(kv),
            mirror,
        }
    }

    pub fn records(&self) -> &CourseStore {
        &self.records
    }

    pub async fn get_settings(&self) -> Settings {
        self.settings.get().await
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), AppError> {
        self.settings.put(settings).await?;
        info!("Settings saved (mirror enabled: {})", settings.mirror_enabled());
        Ok(())
    }

    pub async fn load(&self) -> Result<Vec<Course>, AppError> {
        self.load_with_source().await.map(|loaded| loaded.courses)
    }

    /// Only a failing local store can make this return an error.
    pub async fn load_with_source(&self) -> Result<Loaded, AppError> {
        let settings = self.settings.get().await;

        if settings.mirror_enabled() {
            match self.mirror.fetch(&settings.mirror_url).await {
                Ok(courses) => {
                    info!("Loaded {} courses from mirror", courses.len());
                    return Ok(Loaded {
                        courses,
                        source: LoadSource::Remote,
                    });
                }
                Err(e) => {
                    warn!("Failed to fetch from mirror, falling back to local: {}", e);
                }
            }
        }

        if let Some(courses) = self.records.read_raw().await? {
            info!("Loaded {} courses from local store", courses.len());
            return Ok(Loaded {
                courses,
                source: LoadSource::Local,
            });
        }

        let courses = self.records.seed().await?;
        Ok(Loaded {
            courses,
            source: LoadSource::Seed,
        })
    }

    /// Commits `courses` locally, then mirrors them. The mirror outcome never
    /// reaches the caller and is not retried.
    pub async fn save(&self, courses: &[Course]) -> Result<(), AppError> {
        self.commit(courses).await?;
        self.mirror(courses).await;
        Ok(())
    }

    /// The local half of [`save`](Self::save).
    pub async fn commit(&self, courses: &[Course]) -> Result<(), AppError> {
        self.records.write_raw(courses).await?;
        debug!("Saved {} courses to local store", courses.len());
        Ok(())
    }

    /// The remote half of [`save`](Self::save). Does nothing when the mirror
    /// is disabled; failures are logged only.
    pub async fn mirror(&self, courses: &[Course]) {
        let settings = self.settings.get().await;
        if !settings.mirror_enabled() {
            return;
        }

        match self.mirror.push(&settings.mirror_url, courses).await {
            Ok(()) => debug!("Mirrored {} courses", courses.len()),
            Err(e) => warn!("Failed to mirror courses, local copy kept: {}", e),
        }
    }
}
