use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_lib::dto::{UserDto, UserInsertDto};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::location_of;
use crate::methods::routes::USERS_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    post,
    path = USERS_PATH,
    tag = "users",
    request_body = UserInsertDto,
    responses(
        (status = 201, description = "User created", body = UserDto,
            headers(("Location" = String, description = "URI of the new user"))),
        (status = 400, description = "Malformed body or duplicate value", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_user<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<UserInsertDto>,
) -> Result<Response, ApiError> {
    let created = state
        .user_service
        .create(&payload)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_user", uri.path()))?;

    let location = location_of(uri.path(), created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}
