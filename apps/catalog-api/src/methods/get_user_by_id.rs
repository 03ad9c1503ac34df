use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use catalog_lib::dto::UserDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::parse_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    get,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_user_by_id<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .user_service
        .find_by_id(id)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_user_by_id", uri.path()))
}
