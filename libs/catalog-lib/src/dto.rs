use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::repository::models::{CategoryRow, ProductRow, RoleRow, UserRow};

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("blank", "Required field"));
    }
    Ok(())
}

fn validate_not_future(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date > Utc::now() {
        return Err(field_error("future_date", "Product date cannot be in the future"));
    }
    Ok(())
}

fn validate_category_refs(categories: &[CategoryDto]) -> Result<(), ValidationError> {
    if categories.iter().any(|c| c.id.is_none()) {
        return Err(field_error("missing_id", "Every category must carry an id"));
    }
    Ok(())
}

fn validate_role_refs(roles: &[RoleDto]) -> Result<(), ValidationError> {
    if roles.iter().any(|r| r.id.is_none()) {
        return Err(field_error("missing_id", "Every role must carry an id"));
    }
    Ok(())
}

/// Missing or `null` text reads as empty so the field validators report it.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids listed in `ids`, first occurrence kept, duplicates dropped.
pub(crate) fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut unique = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

impl CategoryDto {
    pub fn from_row(row: CategoryRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Required field"),
        range(min = 0.0, message = "Price must be positive or zero")
    )]
    pub price: Option<f64>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_not_future"))]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(custom(function = "validate_category_refs"))]
    pub categories: Vec<CategoryDto>,
}

impl ProductDto {
    /// Scalar fields only, `categories` is left empty.
    pub fn from_row(row: ProductRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            img_url: row.img_url,
            date: row.date,
            categories: vec![],
        }
    }

    pub fn from_row_with_categories(row: ProductRow, categories: Vec<CategoryRow>) -> Self {
        Self {
            categories: categories.into_iter().map(CategoryDto::from_row).collect(),
            ..Self::from_row(row)
        }
    }

    /// Distinct category ids referenced by this payload.
    pub fn category_ids(&self) -> Vec<i64> {
        unique_ids(self.categories.iter().filter_map(|c| c.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub authority: String,
}

impl RoleDto {
    pub fn from_row(row: RoleRow) -> Self {
        Self {
            id: Some(row.id),
            authority: row.authority,
        }
    }
}

/// User as returned by the API. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<RoleDto>,
}

impl UserDto {
    pub fn from_row_with_roles(row: UserRow, roles: Vec<RoleRow>) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            roles: roles.into_iter().map(RoleDto::from_row).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertDto {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 6, message = "Password must have at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(custom(function = "validate_role_refs"))]
    pub roles: Vec<RoleDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateDto {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_role_refs"))]
    pub roles: Vec<RoleDto>,
}

impl UserInsertDto {
    pub fn role_ids(&self) -> Vec<i64> {
        unique_ids(self.roles.iter().filter_map(|r| r.id))
    }
}

impl UserUpdateDto {
    pub fn role_ids(&self) -> Vec<i64> {
        unique_ids(self.roles.iter().filter_map(|r| r.id))
    }
}
