use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_lib::dto::ProductDto;

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::extractors::ValidatedJson;
use crate::methods::entities::location_of;
use crate::methods::routes::PRODUCTS_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    post,
    path = PRODUCTS_PATH,
    tag = "products",
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto,
            headers(("Location" = String, description = "URI of the new product"))),
        (status = 400, description = "Malformed body or duplicate value", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_product<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<ProductDto>,
) -> Result<Response, ApiError> {
    let created = state
        .product_service
        .create(&payload)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_product", uri.path()))?;

    let location = location_of(uri.path(), created.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}
