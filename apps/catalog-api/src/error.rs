use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_lib::errors_service::CatalogServiceError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMessage {
    pub field_name: String,
    pub message: String,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldMessage>>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { message: String, path: String },
    NotFound { message: String, path: String },
    Integrity { message: String, path: String },
    Validation { errors: Vec<FieldMessage>, path: String },
    Internal { message: String, path: String },
}

impl ApiError {
    pub fn invalid_id(path: &str) -> Self {
        ApiError::BadRequest {
            message: "invalid id".to_string(),
            path: path.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>, path: &str) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            path: path.to_string(),
        }
    }

    /// Builds a 422 with the field list ordered by field name.
    pub fn validation(mut errors: Vec<FieldMessage>, path: &str) -> Self {
        errors.sort_by(|a, b| a.field_name.cmp(&b.field_name).then(a.message.cmp(&b.message)));
        ApiError::Validation {
            errors,
            path: path.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Integrity { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message, path, errors) = match self {
            ApiError::BadRequest { message, path } => ("Bad request", message, path, None),
            ApiError::NotFound { message, path } => ("Resource not found", message, path, None),
            ApiError::Integrity { message, path } => ("Data Base exception", message, path, None),
            ApiError::Validation { errors, path } => (
                "Validation exception",
                format!("Validation failed for {} field(s)", errors.len()),
                path,
                Some(errors),
            ),
            ApiError::Internal { message, path } => ("Internal server error", message, path, None),
        };

        let body = ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message,
            path,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: CatalogServiceError, env: &str, operation: &str, path: &str) -> ApiError {
    let path = path.to_string();
    match err {
        CatalogServiceError::NotFound(message) => ApiError::NotFound { message, path },
        CatalogServiceError::Integrity(message) => ApiError::Integrity { message, path },
        CatalogServiceError::IdentityNotFound(email) => ApiError::NotFound {
            message: format!("Email not found! {email}"),
            path,
        },
        other => {
            tracing::error!(env = %env, error = ?other, operation = %operation, "service error");
            let message = if is_prod_like(env) {
                "internal server error".to_string()
            } else {
                other.to_string()
            };
            ApiError::Internal { message, path }
        }
    }
}
