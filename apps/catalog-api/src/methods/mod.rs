pub mod entities;
pub mod health_check;
pub mod routes;

pub mod create_product;
pub mod delete_product;
pub mod get_product_by_id;
pub mod get_products;
pub mod update_product;

pub mod create_category;
pub mod delete_category;
pub mod get_categories;
pub mod get_category_by_id;
pub mod update_category;

pub mod create_user;
pub mod delete_user;
pub mod get_user_by_id;
pub mod get_users;
pub mod update_user;
