use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub img_url: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductCategoryMapping {
    pub product_id: i64,
    pub category_id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub authority: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRoleMapping {
    pub user_id: i64,
    pub role_id: i64,
    pub authority: String,
}

/// Column values written on product insert/update, with the full set of
/// category ids that replaces the current links.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub img_url: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category_ids: Vec<i64>,
}

/// Column values written on user insert/update. The password hash is only
/// written on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_ids: Vec<i64>,
}
