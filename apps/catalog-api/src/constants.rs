pub const SERVICE: &str = "catalog-api";
pub const ENV: &str = "ENV";

pub const LOCAL_ENV: &str = "local";

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_CONNECT_RETRIES: u32 = 10;

pub const CATALOG_API_PORT: &str = "CATALOG_API_PORT";
pub const DEFAULT_PORT: u16 = 3333;

// Middleware configuration
pub const RATE_LIMIT_PER_MINUTE: &str = "RATE_LIMIT_PER_MINUTE";
pub const RATE_LIMIT_BURST: &str = "RATE_LIMIT_BURST";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const MAX_BODY_SIZE_BYTES: &str = "MAX_BODY_SIZE_BYTES";
pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";
