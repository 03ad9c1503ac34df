use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use catalog_lib::dto::CategoryDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::parse_id;
use crate::methods::routes::CATEGORIES_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    put,
    path = CATEGORIES_BY_ID_PATH,
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Invalid id or malformed body", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_category<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<CategoryDto>,
) -> Result<Json<CategoryDto>, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .category_service
        .update(id, &payload)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "update_category", uri.path()))
}
