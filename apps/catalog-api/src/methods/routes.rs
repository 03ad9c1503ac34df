pub const PRODUCTS_PATH: &str = "/products";
pub const PRODUCTS_BY_ID_PATH: &str = "/products/{id}";
pub const CATEGORIES_PATH: &str = "/categories";
pub const CATEGORIES_BY_ID_PATH: &str = "/categories/{id}";
pub const USERS_PATH: &str = "/users";
pub const USERS_BY_ID_PATH: &str = "/users/{id}";

// Service routes
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";
