use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::parse_id;
use crate::methods::routes::PRODUCTS_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    delete,
    path = PRODUCTS_BY_ID_PATH,
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid id or product still referenced", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_product<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .product_service
        .delete(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| handle_service_error(e, &state.env, "delete_product", uri.path()))
}
