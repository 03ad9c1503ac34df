use async_trait::async_trait;

use crate::pagination::{CategorySort, PageRequest, ProductSort, UserSort};
use crate::repository::errors::CatalogRepositoryError;
use crate::repository::models::{
    CategoryRow, ProductCategoryMapping, ProductRecord, ProductRow, RoleRow, UserRecord,
    UserRoleMapping, UserRow,
};

#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductRow>, CatalogRepositoryError>;
    async fn find_all_paged(
        &self,
        category_id: Option<i64>,
        name: &str,
        page: PageRequest<ProductSort>,
    ) -> Result<(Vec<ProductRow>, u64), CatalogRepositoryError>;
    async fn insert(&self, record: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError>;
    async fn update(&self, id: i64, record: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError>;
}

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRow>, CatalogRepositoryError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<CategoryRow>, CatalogRepositoryError>;
    async fn find_all_paged(
        &self,
        page: PageRequest<CategorySort>,
    ) -> Result<(Vec<CategoryRow>, u64), CatalogRepositoryError>;
    async fn find_for_products(
        &self,
        product_ids: &[i64],
    ) -> Result<Vec<ProductCategoryMapping>, CatalogRepositoryError>;
    async fn insert(&self, name: &str) -> Result<CategoryRow, CatalogRepositoryError>;
    async fn update(&self, id: i64, name: &str) -> Result<CategoryRow, CatalogRepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError>;
}

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRow>, CatalogRepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, CatalogRepositoryError>;
    async fn find_all_paged(
        &self,
        page: PageRequest<UserSort>,
    ) -> Result<(Vec<UserRow>, u64), CatalogRepositoryError>;
    async fn insert(&self, record: &UserRecord, password_hash: &str) -> Result<UserRow, CatalogRepositoryError>;
    async fn update(&self, id: i64, record: &UserRecord) -> Result<UserRow, CatalogRepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError>;
}

#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<RoleRow>, CatalogRepositoryError>;
    async fn find_for_users(&self, user_ids: &[i64]) -> Result<Vec<UserRoleMapping>, CatalogRepositoryError>;
}
