pub mod dto;
pub mod pagination;
pub mod repository;
pub mod util;
pub mod password;
pub mod errors_service;
pub mod product_service;
pub mod category_service;
pub mod user_service;

pub use dto::*;
pub use pagination::*;
pub use errors_service::*;
pub use product_service::*;
pub use category_service::*;
pub use user_service::*;
