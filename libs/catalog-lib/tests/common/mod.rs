#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;

use catalog_lib::pagination::{CategorySort, PageRequest, ProductSort, UserSort};
use catalog_lib::repository::errors::CatalogRepositoryError;
use catalog_lib::repository::models::{
    CategoryRow, ProductCategoryMapping, ProductRecord, ProductRow, RoleRow, UserRecord,
    UserRoleMapping, UserRow,
};
use catalog_lib::repository::traits::{
    CategoryRepositoryTrait, ProductRepositoryTrait, RoleRepositoryTrait, UserRepositoryTrait,
};

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepositoryTrait for ProductRepo {
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
}

mock! {
    pub CategoryRepo {}

    #[async_trait]
    impl CategoryRepositoryTrait for CategoryRepo {
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
}

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
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
}

mock! {
    pub RoleRepo {}

    #[async_trait]
    impl RoleRepositoryTrait for RoleRepo {
        async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<RoleRow>, CatalogRepositoryError>;
        async fn find_for_users(&self, user_ids: &[i64]) -> Result<Vec<UserRoleMapping>, CatalogRepositoryError>;
    }
}

pub fn product_row(id: i64, name: &str) -> ProductRow {
    ProductRow {
        id,
        name: name.to_string(),
        description: Some("Lorem ipsum dolor sit amet".to_string()),
        price: Some(1250.0),
        img_url: Some(format!("https://img.example.com/{id}-big.jpg")),
        date: Some(Utc.with_ymd_and_hms(2020, 7, 14, 10, 0, 0).unwrap()),
    }
}

pub fn category_row(id: i64, name: &str) -> CategoryRow {
    CategoryRow {
        id,
        name: name.to_string(),
    }
}

pub fn role_row(id: i64, authority: &str) -> RoleRow {
    RoleRow {
        id,
        authority: authority.to_string(),
    }
}

pub fn user_row(id: i64, first_name: &str, email: &str) -> UserRow {
    UserRow {
        id,
        first_name: first_name.to_string(),
        last_name: "Brown".to_string(),
        email: email.to_string(),
        password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

pub fn product_record_to_row(id: i64, record: &ProductRecord) -> ProductRow {
    ProductRow {
        id,
        name: record.name.clone(),
        description: record.description.clone(),
        price: record.price,
        img_url: record.img_url.clone(),
        date: record.date,
    }
}

pub fn user_record_to_row(id: i64, record: &UserRecord) -> UserRow {
    UserRow {
        id,
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        email: record.email.clone(),
        password: String::new(),
    }
}
