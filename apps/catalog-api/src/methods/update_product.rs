use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use catalog_lib::dto::ProductDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::parse_id;
use crate::methods::routes::PRODUCTS_BY_ID_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    put,
    path = PRODUCTS_BY_ID_PATH,
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid id or malformed body", body = ErrorResponse),
        (status = 404, description = "Product or category not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_product<R: CatalogRepositories>(
    Path(id): Path<String>,
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<ProductDto>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = parse_id(&id, uri.path())?;

    state
        .product_service
        .update(id, &payload)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "update_product", uri.path()))
}
