use axum::Json;
use axum::extract::Path;
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::models::*;
use crate::services::{DashboardStats, LoadSource};
use crate::state::AppState;
use crate::storage::SETTINGS_KEY;

#[derive(Serialize)]
struct ReloadResponse {
    source: LoadSource,
    courses: Vec<Course>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(save_course).put(replace_courses))
        .route("/courses/import", post(import_courses))
        .route("/courses/reload", post(reload_courses))
        .route("/courses/{id}", put(update_course).delete(delete_course))
        .route("/settings", get(get_settings).put(save_settings))
        .route("/stats", get(stats))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.read(SETTINGS_KEY).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.catalog.list().await)
}

async fn save_course(
    State(state): State<AppState>,
    Json(course): Json<Course>
) -> Result<Json<Course>, AppError> {
    let course = state.catalog.upsert(course.validate()?).await?;
    Ok(Json(course))
}

async fn replace_courses(
    State(state): State<AppState>,
    Json(courses): Json<Vec<Course>>
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.catalog.replace_all(courses).await?;
    Ok(Json(courses))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(course): Json<Course>
) -> Result<Json<Course>, AppError> {
    let course = state.catalog.replace(&id, course.validate()?).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<StatusCode, AppError> {
    state.catalog.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn import_courses(
    State(state): State<AppState>,
    Json(batch): Json<Vec<Course>>
) -> Result<Json<Vec<Course>>, AppError> {
    let batch = batch
        .into_iter()
        .map(Course::validate)
        .collect::<Result<Vec<_>, _>>()?;
    let imported = state.catalog.import(batch).await?;
    Ok(Json(imported))
}

async fn reload_courses(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let loaded = state.catalog.reload().await?;
    Ok(Json(ReloadResponse {
        source: loaded.source,
        courses: loaded.courses,
    }))
}

async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.catalog.sync().get_settings().await)
}

async fn save_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>
) -> Result<Json<Settings>, AppError> {
    state.catalog.sync().save_settings(&settings).await?;
    Ok(Json(settings))
}

async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let courses = state.catalog.list().await;
    Json(DashboardStats::compute(&courses))
}
