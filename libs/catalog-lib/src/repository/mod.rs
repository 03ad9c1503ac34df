pub mod product_repository;
pub mod category_repository;
pub mod user_repository;
pub mod role_repository;
pub mod models;
pub mod errors;
pub mod traits;

pub use product_repository::ProductRepository;
pub use category_repository::CategoryRepository;
pub use user_repository::UserRepository;
pub use role_repository::RoleRepository;
pub use errors::CatalogRepositoryError;
