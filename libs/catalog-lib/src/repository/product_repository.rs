use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySql, MySqlPool, QueryBuilder, Transaction};

use crate::pagination::{PageRequest, ProductSort};
use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::{ProductRecord, ProductRow};
use crate::repository::traits::ProductRepositoryTrait;

const SELECT_PRODUCT: &str =
    "SELECT p.id, p.name, p.description, p.price, p.img_url, p.date FROM product p";

// Both filters are optional: a NULL category id and an empty name match every product.
const PRODUCT_FILTER: &str = r#"
    WHERE (? IS NULL OR EXISTS (
        SELECT 1 FROM product_category pc
        WHERE pc.product_id = p.id AND pc.category_id = ?
    ))
    AND LOWER(p.name) LIKE ?
"#;

/// Case-insensitive "contains" pattern with LIKE wildcards escaped.
fn name_pattern(name: &str) -> String {
    let escaped = name
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pub pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_in_tx(
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<ProductRow, CatalogRepositoryError> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.id = ?");
        query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_sqlx_error)
    }

    /// Replaces every category link of `product_id` with `category_ids`.
    async fn replace_category_links(
        tx: &mut Transaction<'_, MySql>,
        product_id: i64,
        category_ids: &[i64],
    ) -> Result<(), CatalogRepositoryError> {
        query(r#"DELETE FROM product_category WHERE product_id = ?"#)
            .bind(product_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;

        if category_ids.is_empty() {
            return Ok(());
        }

        let mut builder =
            QueryBuilder::<MySql>::new("INSERT INTO product_category (product_id, category_id) ");
        builder.push_values(category_ids, |mut row, category_id| {
            row.push_bind(product_id).push_bind(*category_id);
        });
        builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductRow>, CatalogRepositoryError> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.id = ?");
        let product = query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(product)
    }

    async fn find_all_paged(
        &self,
        category_id: Option<i64>,
        name: &str,
        page: PageRequest<ProductSort>,
    ) -> Result<(Vec<ProductRow>, u64), CatalogRepositoryError> {
        let pattern = name_pattern(name);
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM product p {PRODUCT_FILTER}");
        let total = query_scalar::<_, i64>(&count_sql)
            .bind(category_id)
            .bind(category_id)
            .bind(&pattern)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let page_sql = format!(
            "{SELECT_PRODUCT} {PRODUCT_FILTER} ORDER BY {} LIMIT ? OFFSET ?",
            page.order_by("p.")
        );
        let products = query_as::<_, ProductRow>(&page_sql)
            .bind(category_id)
            .bind(category_id)
            .bind(&pattern)
            .bind(page.size as u64)
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok((products, total as u64))
    }

    async fn insert(&self, record: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = query(
            r#"
            INSERT INTO product (name, description, price, img_url, date)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.price)
        .bind(&record.img_url)
        .bind(record.date)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_id() as i64;
        Self::replace_category_links(&mut tx, id, &record.category_ids).await?;
        let product = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(product)
    }

    async fn update(&self, id: i64, record: &ProductRecord) -> Result<ProductRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        query_scalar::<_, i64>(r#"SELECT id FROM product WHERE id = ? FOR UPDATE"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CatalogRepositoryError::NotFound)?;

        query(
            r#"
            UPDATE product
            SET name = ?, description = ?, price = ?, img_url = ?, date = ?
            WHERE id = ?
            "#
        )
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.price)
        .bind(&record.img_url)
        .bind(record.date)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        Self::replace_category_links(&mut tx, id, &record.category_ids).await?;
        let product = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        query(r#"DELETE FROM product_category WHERE product_id = ?"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let result = query(
            r#"
            DELETE FROM product WHERE id = ?
            "#
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CatalogRepositoryError::NotFound);
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::name_pattern;

    #[test]
    fn empty_name_matches_everything() {
        assert_eq!(name_pattern(""), "%%");
    }

    #[test]
    fn name_pattern_lowercases_and_escapes_wildcards() {
        assert_eq!(name_pattern(" PC Gamer "), "%pc gamer%");
        assert_eq!(name_pattern("50%_off"), "%50\\%\\_off%");
    }
}
