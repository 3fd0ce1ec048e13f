//! Moderator routes. All but `check` run behind the admin gate.

use crate::domain::error::ApiError;
use crate::router::AppState;
use crate::routes::blocking;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cm_02_naming_workflow::{parse_id, WorkflowRequest};
use cm_03_cat_registry::{CatUpdate, NewCat};
use serde_json::{json, Value};
use shared_types::CatId;

fn cat_id(path: Result<Path<String>, PathRejection>) -> Result<CatId, ApiError> {
    let Path(raw) = path?;
    Ok(parse_id("id", &raw)?)
}

/// `POST /api/admin/voting`
pub async fn apply_workflow_action(
    State(state): State<AppState>,
    body: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    let command = request.validate()?;
    let naming = state.naming.clone();
    let cat = blocking(move || naming.apply_workflow_action(command.cat_id, command.action)).await?;
    Ok(Json(json!({ "cat": cat })))
}

/// `GET /api/admin/cats`
pub async fn list_cats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let registry = state.registry.clone();
    let cats = blocking(move || registry.list_cats()).await?;
    Ok(Json(json!({ "cats": cats })))
}

/// `POST /api/admin/cats`
pub async fn create_cat(
    State(state): State<AppState>,
    body: Result<Json<NewCat>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new_cat) = body?;
    let registry = state.registry.clone();
    let cat = blocking(move || registry.create_cat(new_cat)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "cat": cat }))))
}

/// `GET /api/admin/cats/:id`
pub async fn get_cat(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = cat_id(path)?;
    let registry = state.registry.clone();
    let cat = blocking(move || registry.get_cat(id)).await?;
    Ok(Json(json!({ "cat": cat })))
}

/// `PUT /api/admin/cats/:id`
pub async fn update_cat(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CatUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = cat_id(path)?;
    let Json(update) = body?;
    let registry = state.registry.clone();
    let cat = blocking(move || registry.update_cat(id, update)).await?;
    Ok(Json(json!({ "cat": cat })))
}

/// `DELETE /api/admin/cats/:id`
pub async fn delete_cat(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = cat_id(path)?;
    let registry = state.registry.clone();
    blocking(move || registry.delete_cat(id)).await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/admin/check`
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    Json(json!({ "authenticated": state.gate.is_admin(&headers) }))
}
