/// Hunt endpoints
///
/// # Endpoints
///
/// - `GET /api/hunts` - List hunts
/// - `POST /api/hunts` - Create hunt
/// - `GET /api/hunts/:id` - Get hunt
/// - `DELETE /api/hunts/:id` - Delete hunt

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
use hunt_shared::models::hunt::{Hunt, HuntQuery, NewHunt};

/// List hunts
///
/// # Endpoint
///
/// ```text
/// GET /api/hunts?hostid=1234&title=crawl&sortby=title&sortorder=desc
/// ```
///
/// `hostid` matches exactly, `title` and `description` match substrings;
/// all three ignore case. Results are sorted by `title` ascending unless
/// `sortby` / `sortorder` say otherwise.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown `sortby` value
/// - `500 Internal Server Error`: Store failure
pub async fn list_hunts(
    State(state): State<AppState>,
    query: Result<Query<HuntQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Hunt>>> {
    let Query(query) = query?;

    let hunts = Hunt::list(state.store.as_ref(), &query).await?;
    Ok(Json(hunts))
}

/// Get a hunt by id
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not a legal identifier
/// - `404 Not Found`: No such hunt
pub async fn get_hunt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Hunt>> {
    let hunt = Hunt::find_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(hunt))
}

/// Create a hunt
///
/// # Endpoint
///
/// ```text
/// POST /api/hunts
/// Content-Type: application/json
///
/// {
///   "title": "Campus Crawl",
///   "hostId": "65d8f8d62b531fa812f0f498",
///   "description": "A hunt for the Morris bear",
///   "task": "Find the bear"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"id": "<new id>"}`
///
/// # Errors
///
/// - `400 Bad Request`: Malformed JSON, or an empty `title` / `task`
pub async fn create_hunt(
    State(state): State<AppState>,
    payload: Result<Json<NewHunt>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(data) = payload?;

    let id = Hunt::create(state.store.as_ref(), data).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_hex() }),
    ))
}

/// Delete a hunt
///
/// Tasks that reference the hunt are left in place.
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not a legal identifier
/// - `404 Not Found`: No such hunt, including an already deleted one
pub async fn delete_hunt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    Hunt::delete(state.store.as_ref(), &id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
