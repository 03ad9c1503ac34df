use std::sync::Arc;

use catalog_lib::category_service::CategoryService;
use catalog_lib::product_service::ProductService;
use catalog_lib::repository::traits::{
    CategoryRepositoryTrait, ProductRepositoryTrait, RoleRepositoryTrait, UserRepositoryTrait,
};
use catalog_lib::repository::{CategoryRepository, ProductRepository, RoleRepository, UserRepository};
use catalog_lib::user_service::UserService;
use catalog_lib::util::MySqlPool;

/// The repository implementations the services run on.
pub trait CatalogRepositories: Send + Sync + 'static {
    type Products: ProductRepositoryTrait + 'static;
    type Categories: CategoryRepositoryTrait + 'static;
    type Users: UserRepositoryTrait + 'static;
    type Roles: RoleRepositoryTrait + 'static;
}

/// MySQL-backed repositories.
pub struct MySqlRepositories;

impl CatalogRepositories for MySqlRepositories {
    type Products = ProductRepository;
    type Categories = CategoryRepository;
    type Users = UserRepository;
    type Roles = RoleRepository;
}

pub struct AppState<R = MySqlRepositories>
where
    R: CatalogRepositories,
{
    pub product_service: Arc<ProductService<R::Products, R::Categories>>,
    pub category_service: Arc<CategoryService<R::Categories>>,
    pub user_service: Arc<UserService<R::Users, R::Roles>>,
    pub env: String,
}

impl<R: CatalogRepositories> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            product_service: self.product_service.clone(),
            category_service: self.category_service.clone(),
            user_service: self.user_service.clone(),
            env: self.env.clone(),
        }
    }
}

impl AppState<MySqlRepositories> {
    /// Wires every service on one shared pool.
    pub fn from_pool(pool: MySqlPool, env: String) -> Self {
        Self {
            product_service: Arc::new(ProductService::new(
                ProductRepository::new(pool.clone()),
                CategoryRepository::new(pool.clone()),
            )),
            category_service: Arc::new(CategoryService::new(CategoryRepository::new(pool.clone()))),
            user_service: Arc::new(UserService::new(
                UserRepository::new(pool.clone()),
                RoleRepository::new(pool),
            )),
            env,
        }
    }
}
