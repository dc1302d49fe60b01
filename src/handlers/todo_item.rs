use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::app::AppState;
use crate::auth::AuthorizedUser;
use crate::config::ForbiddenDeletePolicy;
use crate::database::{TodoItem, TodoList};
use crate::error::{ApiError, ApiResult};
use crate::services::DeleteOutcome;

/// POST /todoitem - create an item, or upsert one when the body carries an id
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    payload: Result<Json<TodoItem>, JsonRejection>,
) -> ApiResult<Json<TodoItem>> {
    let Json(item) = payload?;
    let stored = state.service.add(&user, item).await?;
    Ok(Json(stored))
}

/// GET /todoitem - every item owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
) -> ApiResult<Json<TodoList>> {
    let list = state.service.list(&user).await?;
    Ok(Json(list))
}

/// DELETE /todoitem/:id - 204 unless the store fails or a refused delete is configured to 403
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let outcome = state.service.delete(&user, &id).await?;
    delete_status(outcome, state.forbidden_delete, &id)
}

fn delete_status(outcome: DeleteOutcome, policy: ForbiddenDeletePolicy, id: &str) -> ApiResult<StatusCode> {
    match (outcome, policy) {
        (DeleteOutcome::Forbidden, ForbiddenDeletePolicy::Reject) => {
            Err(ApiError::forbidden(format!("Item '{}' belongs to another user", id)))
        }
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
