use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use catalog_lib::dto::CategoryDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::parse_id;
use crate::methods::routes::CATEGORIES_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    get,
    path = CATEGORIES_BY_ID_PATH,
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_category_by_id<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<CategoryDto>, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .category_service
        .find_by_id(id)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_category_by_id", uri.path()))
}
