use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::Json;
use catalog_lib::dto::UserDto;
use catalog_lib::pagination::{UserSort, Page};

use crate::error::{handle_service_error, ApiError, ErrorResponse};
use crate::methods::entities::PageQuery;
use crate::methods::routes::USERS_PATH;
use crate::state::{AppState, CatalogRepositories};

#[utoipa::path(
    get,
    path = USERS_PATH,
    tag = "users",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users", body = Page<UserDto>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_users<R: CatalogRepositories>(
    State(state): State<AppState<R>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<UserDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text(), uri.path()))?;
    let page = query
        .page_request::<UserSort>()
        .map_err(|e| ApiError::bad_request(e.to_string(), uri.path()))?;

    state
        .user_service
        .find_all_paged(page)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_users", uri.path()))
}
