use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::parse_id;
use crate::methods::routes::CATEGORIES_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    delete,
    path = CATEGORIES_BY_ID_PATH,
    tag = "categories",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Invalid id or category still referenced by products", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_category<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .category_service
        .delete(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| handle_service_error(e, &state.env, "delete_category", uri.path()))
}
