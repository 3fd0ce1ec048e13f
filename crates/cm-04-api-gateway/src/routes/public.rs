//! Public routes: suggestions, votes, listings, sightings.

use crate::domain::error::ApiError;
use crate::middleware::origin::origin_candidates;
use crate::router::AppState;
use crate::routes::blocking;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use cm_02_naming_workflow::{SuggestionRequest, SuggestionsQuery, VoteRequest};
use cm_03_cat_registry::SightingSubmission;
use serde_json::{json, Value};
use std::net::SocketAddr;

type Created = (StatusCode, Json<Value>);

/// `GET /api/suggestions?cat_id=`
pub async fn list_suggestions(
    State(state): State<AppState>,
    query: Result<Query<SuggestionsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let cat_id = query.validate()?;
    let naming = state.naming.clone();
    let suggestions = blocking(move || naming.list_suggestions(cat_id)).await?;
    Ok(Json(json!({ "suggestions": suggestions })))
}

/// `POST /api/suggestions`
pub async fn submit_suggestion(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    let command = request.validate()?;
    let naming = state.naming.clone();
    let suggestion = blocking(move || {
        naming.submit_suggestion(command.cat_id, &command.suggested_name)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "suggestion": suggestion }))))
}

/// `POST /api/votes`
pub async fn submit_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(request) = body?;
    let command = request.validate()?;
    let origins = origin_candidates(&headers, peer.map(|ConnectInfo(addr)| addr));
    let naming = state.naming.clone();
    blocking(move || naming.submit_vote(command.suggestion_id, &origins)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// `GET /api/voting-cats`
pub async fn list_voting_cats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let registry = state.registry.clone();
    let cats = blocking(move || registry.list_voting_cats()).await?;
    Ok(Json(json!({ "cats": cats })))
}

/// `GET /api/cats`
pub async fn list_gallery(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let registry = state.registry.clone();
    let cats = blocking(move || registry.list_gallery()).await?;
    Ok(Json(json!({ "cats": cats })))
}

/// `POST /api/submit`
pub async fn submit_sighting(
    State(state): State<AppState>,
    body: Result<Json<SightingSubmission>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(submission) = body?;
    let registry = state.registry.clone();
    let cat = blocking(move || registry.submit_sighting(submission)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "cat": cat })),
    ))
}
