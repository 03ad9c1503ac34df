use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::parse_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    delete,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id or category still referenced by other records", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_user<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .user_service
        .delete(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| handle_service_error(e, &state.env, "delete_user", uri.path()))
}
