use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{MirrorClient, MirrorError};
use crate::{error::AppError, models::Course};

/// Talks to a spreadsheet-style webhook: `GET` returns the whole collection,
/// `POST` replaces it.
pub struct HttpMirror {
    client: Client,
}

impl HttpMirror {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MirrorClient for HttpMirror {
    async fn fetch(&self, url: &str) -> Result<Vec<Course>, MirrorError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Status(status));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        if !value.is_array() {
            return Err(MirrorError::NotAnArray(json_kind(&value)));
        }

        let courses: Vec<Course> = serde_json::from_value(value)?;
        debug!("Mirror returned {} courses", courses.len());
        Ok(courses)
    }

    async fn push(&self, url: &str, courses: &[Course]) -> Result<(), MirrorError> {
        let response = self.client.post(url).json(courses).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Status(status));
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
