pub mod config;
pub mod constants;
pub mod error;
pub mod extractors;
pub mod methods;
pub mod shutdown;
pub mod state;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use catalog_lib::dto::{CategoryDto, ProductDto, RoleDto, UserDto, UserInsertDto, UserUpdateDto};
use catalog_lib::pagination::Page;

use crate::error::{ErrorResponse, FieldMessage};
use crate::methods::create_category::{__path_create_category, create_category};
use crate::methods::create_product::{__path_create_product, create_product};
use crate::methods::create_user::{__path_create_user, create_user};
use crate::methods::delete_category::{__path_delete_category, delete_category};
use crate::methods::delete_product::{__path_delete_product, delete_product};
use crate::methods::delete_user::{__path_delete_user, delete_user};
use crate::methods::get_categories::{__path_get_categories, get_categories};
use crate::methods::get_category_by_id::{__path_get_category_by_id, get_category_by_id};
use crate::methods::get_product_by_id::{__path_get_product_by_id, get_product_by_id};
use crate::methods::get_products::{__path_get_products, get_products};
use crate::methods::get_user_by_id::{__path_get_user_by_id, get_user_by_id};
use crate::methods::get_users::{__path_get_users, get_users};
use crate::methods::health_check::{__path_health_check, health_check};
use crate::methods::routes::{
    CATEGORIES_BY_ID_PATH, CATEGORIES_PATH, OPENAPI_JSON_PATH, PRODUCTS_BY_ID_PATH, PRODUCTS_PATH,
    SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH, USERS_BY_ID_PATH, USERS_PATH,
};
use crate::methods::update_category::{__path_update_category, update_category};
use crate::methods::update_product::{__path_update_product, update_product};
use crate::methods::update_user::{__path_update_user, update_user};
use crate::state::{AppState, CatalogRepositories};

#[derive(OpenApi)]
#[openapi(
    paths(
        get_products, get_product_by_id, create_product, update_product, delete_product,
        get_categories, get_category_by_id, create_category, update_category, delete_category,
        get_users, get_user_by_id, create_user, update_user, delete_user,
        health_check
    ),
    components(schemas(
        ProductDto, CategoryDto, UserDto, UserInsertDto, UserUpdateDto, RoleDto,
        Page<ProductDto>, Page<CategoryDto>, Page<UserDto>,
        ErrorResponse, FieldMessage
    )),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "categories", description = "Category endpoints"),
        (name = "users", description = "User administration endpoints"),
        (name = "service", description = "Service endpoints")
    )
)]
pub struct ApiDoc;

/// Every catalog route plus health and docs, without the middleware stack.
pub fn app<R: CatalogRepositories>(state: AppState<R>) -> Router {
    let catalog_routes = Router::new()
        .route(PRODUCTS_PATH, get(get_products::<R>).post(create_product::<R>))
        .route(
            PRODUCTS_BY_ID_PATH,
            get(get_product_by_id::<R>)
                .put(update_product::<R>)
                .delete(delete_product::<R>),
        )
        .route(CATEGORIES_PATH, get(get_categories::<R>).post(create_category::<R>))
        .route(
            CATEGORIES_BY_ID_PATH,
            get(get_category_by_id::<R>)
                .put(update_category::<R>)
                .delete(delete_category::<R>),
        )
        .route(USERS_PATH, get(get_users::<R>).post(create_user::<R>))
        .route(
            USERS_BY_ID_PATH,
            get(get_user_by_id::<R>)
                .put(update_user::<R>)
                .delete(delete_user::<R>),
        );

    let root_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    Router::new()
        .merge(catalog_routes)
        .merge(root_routes)
        .with_state(state)
}
