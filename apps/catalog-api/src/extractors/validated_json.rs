//! JSON extractor that runs `validator` constraints before the handler.

use axum::extract::{FromRequest, Json, OriginalUri, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldMessage};

/// `first_name` -> `firstName`, matching the JSON names of the payload.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn field_messages(errors: &ValidationErrors) -> Vec<FieldMessage> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            let field_name = to_camel_case(field);
            field_errors.iter().map(move |err| FieldMessage {
                field_name: field_name.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect()
}

/// Rejects malformed bodies with 400 and constraint failures with 422,
/// both in the common error envelope.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text(), &path))?;

        data.validate()
            .map_err(|e| ApiError::validation(field_messages(&e), &path))?;

        Ok(ValidatedJson(data))
    }
}
