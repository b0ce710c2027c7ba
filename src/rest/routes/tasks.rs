// rest/routes/tasks.rs: Task CRUD routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::rest::error::ApiError;
use crate::store::{TaskDraft, TaskPatch};
use crate::AppContext;

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let tasks = ctx.store.list();
    let count = tasks.len();
    Json(json!({
        "tasks": tasks,
        "count": count,
        "status": "success",
    }))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = ctx.store.get(id)?;
    Ok(Json(json!({ "task": task, "status": "success" })))
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = decode_body(body)?;
    let task = ctx.store.create(draft)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "task": task, "status": "created" })),
    ))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&id)?;
    let patch = decode_body(body)?;
    let task = ctx.store.update(id, patch)?;
    Ok(Json(json!({ "task": task, "status": "updated" })))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_task_id(&id)?;
    ctx.store.delete(id)?;
    Ok(Json(json!({
        "message": "Task deleted successfully",
        "task_id": id,
        "status": "deleted",
    })))
}

/// Route ids are matched as strings; anything that does not parse as an
/// integer is an unknown endpoint, not a task lookup.
fn parse_task_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| ApiError::EndpointNotFound)
}

/// Decode an optional JSON body.
///
/// A missing or wrong content type is a transport error (415). An empty or
/// undecodable body counts as "no payload" and is left to the store's
/// body-required validation. A body that is valid JSON but the wrong shape
/// is a 400.
fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<Option<T>, ApiError> {
    match body {
        Ok(Json(value)) => Ok(Some(value)),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::UnsupportedMediaType),
        Err(JsonRejection::JsonDataError(_)) => Err(ApiError::InvalidBody),
        Err(_) => Ok(None),
    }
}
