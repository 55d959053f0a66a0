use crate::{ApiError, AppState, Caller};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use domain::{Content, ContentPatch, NewContent};
use serde_json::{json, Value};
use std::collections::HashSet;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content", get(get_all).post(create).options(options))
        .route(
            "/content/:id",
            get(get_one)
                .put(update)
                .delete(delete)
                .options(options_with_id),
        )
}

async fn create(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(new_content): Json<NewContent>,
) -> Result<Json<Content>, ApiError> {
    let content = state
        .tutorial_app
        .content_service
        .create(caller.as_ref(), new_content)
        .await?;
    Ok(Json(content))
}

async fn update(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(patch): Json<ContentPatch>,
) -> Result<Json<Content>, ApiError> {
    let content = state
        .tutorial_app
        .content_service
        .update(caller.as_ref(), &id, patch)
        .await?;
    Ok(Json(content))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Content>, ApiError> {
    let content = state.tutorial_app.content_service.get(&id).await?;
    Ok(Json(content))
}

async fn delete(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .tutorial_app
        .content_service
        .delete(caller.as_ref(), &id)
        .await?;
    Ok(Json(json!({})))
}

async fn get_all(State(state): State<AppState>) -> Result<Json<HashSet<Content>>, ApiError> {
    let contents = state.tutorial_app.content_service.get_all().await?;
    Ok(Json(contents))
}

async fn options() -> StatusCode {
    StatusCode::OK
}

async fn options_with_id(Path(_id): Path<String>) -> StatusCode {
    StatusCode::OK
}
