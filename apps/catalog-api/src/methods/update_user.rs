use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use catalog_lib::dto::{UserDto, UserUpdateDto};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::parse_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    put,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UserUpdateDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Invalid id or malformed body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_user<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<UserUpdateDto>,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .user_service
        .update(id, &payload)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "update_user", uri.path()))
}
