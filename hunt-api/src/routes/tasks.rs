/// Task endpoints
///
/// - `GET /api/tasks` - List tasks, ordered by position
/// - `POST /api/tasks`, `PUT /api/tasks` - Create task
/// - `GET /api/tasks/:id` - Get task
/// - `DELETE /api/tasks/:id` - Delete task
/// - `POST /api/tasks/:id/done` - Mark task done

use super::{CreatedResponse, DeletedResponse};
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use hunt_shared::models::task::{NewTask, Task, TaskQuery};

/// List tasks, filtered by `position` and/or `huntId`
///
/// A `position` that is not an integer is a `400`.
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Query(query) = query?;

    let tasks = Task::list(state.store.as_ref(), &query).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(task))
}

/// Create a task
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {
///   "description": "Ring the bell",
///   "position": 0,
///   "huntId": "65d8f8d6384ab865a9acad5f"
/// }
/// ```
///
/// Returns `201 Created` with `{"id": "<new id>"}`. The referenced hunt is
/// not checked for existence.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(data) = payload?;

    let id = Task::create(state.store.as_ref(), data).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_hex() }),
    ))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    Task::delete(state.store.as_ref(), &id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}

/// Mark a task done and return the updated task
pub async fn mark_task_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = Task::mark_done(state.store.as_ref(), &id).await?;
    Ok(Json(task))
}
