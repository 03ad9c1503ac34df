use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySql, MySqlPool, QueryBuilder};

use crate::pagination::{CategorySort, PageRequest};
use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::{CategoryRow, ProductCategoryMapping};
use crate::repository::traits::CategoryRepositoryTrait;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pub pool: MySqlPool,
}

impl CategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryRow>, CatalogRepositoryError> {
        let category = query_as::<_, CategoryRow>(
            r#"
            SELECT id, name FROM category WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(category)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<CategoryRow>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT id, name FROM category WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let categories = builder
            .build_query_as::<CategoryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(categories)
    }

    async fn find_all_paged(
        &self,
        page: PageRequest<CategorySort>,
    ) -> Result<(Vec<CategoryRow>, u64), CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let total = query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM category"#)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let sql = format!(
            "SELECT id, name FROM category ORDER BY {} LIMIT ? OFFSET ?",
            page.order_by("")
        );
        let categories = query_as::<_, CategoryRow>(&sql)
            .bind(page.size as u64)
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok((categories, total as u64))
    }

    async fn find_for_products(
        &self,
        product_ids: &[i64],
    ) -> Result<Vec<ProductCategoryMapping>, CatalogRepositoryError> {
        if product_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(
            r#"
            SELECT pc.product_id, c.id AS category_id, c.name AS category_name
            FROM product_category pc
            INNER JOIN category c ON c.id = pc.category_id
            WHERE pc.product_id IN ("#,
        );
        let mut separated = builder.separated(", ");
        for id in product_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY pc.product_id, c.id");

        let mappings = builder
            .build_query_as::<ProductCategoryMapping>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(mappings)
    }

    async fn insert(&self, name: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        let result = query(
            r#"
            INSERT INTO category (name)
            VALUES (?)
            "#
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let category = query_as::<_, CategoryRow>(
            r#"SELECT id, name FROM category WHERE id = ? "#
        )
        .bind(result.last_insert_id() as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(category)
    }

    async fn update(&self, id: i64, name: &str) -> Result<CategoryRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        query_scalar::<_, i64>(r#"SELECT id FROM category WHERE id = ? FOR UPDATE"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CatalogRepositoryError::NotFound)?;

        query(
            r#"
            UPDATE category
            SET name = ?
            WHERE id = ?
            "#
        )
        .bind(name)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let category = query_as::<_, CategoryRow>(
            r#"SELECT id, name FROM category WHERE id = ? "#
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(category)
    }

    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError> {
        let result = query(
            r#"
            DELETE FROM category WHERE id = ?
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogRepositoryError::NotFound);
        }
        Ok(())
    }
}
