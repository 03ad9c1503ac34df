use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::Json;
use catalog_lib::dto::CategoryDto;
use catalog_lib::pagination::{CategorySort, Page};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::PageQuery;
use crate::methods::routes::CATEGORIES_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    get,
    path = CATEGORIES_PATH,
    tag = "categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of categories", body = Page<CategoryDto>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_categories<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<CategoryDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;
    let page = query
        .page_request::<CategorySort>()
        .map_err(|e| ApiError::bad_request(e.to_string(), uri.path()))?;

    state
        .category_service
        .find_all_paged(page)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_categories", uri.path()))
}
