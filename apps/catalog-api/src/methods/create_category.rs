use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_lib::dto::CategoryDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::location_of;
use crate::methods::routes::CATEGORIES_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    post,
    path = CATEGORIES_PATH,
    tag = "categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto,
            headers(("Location" = String, description = "URI of the new category"))),
        (status = 400, description = "Malformed body or duplicate value", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_category<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<CategoryDto>,
) -> Result<Response, ApiError> {
    let created = state
        .category_service
        .create(&payload)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_category", uri.path()))?;

    let location = location_of(uri.path(), created.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}
