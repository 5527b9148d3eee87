pub mod http;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::Course;

pub use http::HttpMirror;

/// Why a mirror request did not produce a usable result. Never leaves the
/// synchronizer; it is logged and the local copy is used instead.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mirror answered {0}")]
    Status(StatusCode),

    #[error("expected a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("payload is not a course collection: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A remote copy of the course collection reachable at a user-supplied URL.
#[async_trait]
pub trait MirrorClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<Course>, MirrorError>;
    async fn push(&self, url: &str, courses: &[Course]) -> Result<(), MirrorError>;
}
