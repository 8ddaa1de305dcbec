//! HTTP routes for the reminder resource.
//!
//! # Responsibility
//! - Map REST verbs onto reminder service operations.
//! - Turn extractor rejections into the same 400 body as validation errors.

use crate::error::ApiError;
use crate::paging::{ListParams, ReminderListResponse};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use reminder_core::{ReminderEntity, ReminderForm, ReminderId};
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route("/reminders/", get(list_reminders).post(create_reminder))
        .route(
            "/reminders/:id",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_reminder(
    State(state): State<AppState>,
    id: Result<Path<ReminderId>, PathRejection>,
) -> Result<Json<ReminderEntity>, ApiError> {
    let Path(id) = id?;
    let entity = state.with_service(|service| service.find_by_id(id))?;
    Ok(Json(entity))
}

async fn list_reminders(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ReminderListResponse>, ApiError> {
    let Query(params) = params?;
    let page = params.validate().map_err(ApiError::BadRequest)?;
    let results = state.with_service(|service| service.find_list(page.limit, page.offset))?;
    Ok(Json(ReminderListResponse::new(page, results)))
}

async fn create_reminder(
    State(state): State<AppState>,
    form: Result<Json<ReminderForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(form) = form?;
    let entity = state.with_service(|service| service.create(&form))?;
    let location = format!("/reminders/{}", entity.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(entity),
    ))
}

async fn update_reminder(
    State(state): State<AppState>,
    id: Result<Path<ReminderId>, PathRejection>,
    form: Result<Json<ReminderForm>, JsonRejection>,
) -> Result<Json<ReminderEntity>, ApiError> {
    let Path(id) = id?;
    let Json(form) = form?;
    let entity = state.with_service(|service| service.update(id, &form))?;
    Ok(Json(entity))
}

async fn delete_reminder(
    State(state): State<AppState>,
    id: Result<Path<ReminderId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.with_service(|service| service.delete(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    info!(
        "event=http_request module=api method={method} path={path} status={} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
