use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::Json;
use catalog_lib::dto::ProductDto;
use catalog_lib::pagination::{Page, ProductSort};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::ProductQuery;
use crate::methods::routes::PRODUCTS_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    get,
    path = PRODUCTS_PATH,
    tag = "products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Page of products", body = Page<ProductDto>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_products<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Page<ProductDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;
    let page = query
        .page_request::<ProductSort>()
        .map_err(|e| ApiError::bad_request(e.to_string(), uri.path()))?;
    let name = query.name.as_deref().unwrap_or_default();

    state
        .product_service
        .find_all_paged(query.category_id, name, page)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_products", uri.path()))
}
