use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySql, MySqlPool, QueryBuilder, Transaction};

use crate::pagination::{PageRequest, UserSort};
use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::{UserRecord, UserRow};
use crate::repository::traits::UserRepositoryTrait;

const SELECT_USER: &str =
    "SELECT u.id, u.first_name, u.last_name, u.email, u.password FROM `user` u";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_in_tx(
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<UserRow, CatalogRepositoryError> {
        let sql = format!("{SELECT_USER} WHERE u.id = ?");
        query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_sqlx_error)
    }

    async fn replace_role_links(
        tx: &mut Transaction<'_, MySql>,
        user_id: i64,
        role_ids: &[i64],
    ) -> Result<(), CatalogRepositoryError> {
        query(r#"DELETE FROM user_role WHERE user_id = ?"#)
            .bind(user_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;

        if role_ids.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::<MySql>::new("INSERT INTO user_role (user_id, role_id) ");
        builder.push_values(role_ids, |mut row, role_id| {
            row.push_bind(user_id).push_bind(*role_id);
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
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRow>, CatalogRepositoryError> {
        let sql = format!("{SELECT_USER} WHERE u.id = ?");
        let user = query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, CatalogRepositoryError> {
        // `email` uses a binary collation, so this is an exact, case-sensitive match.
        let sql = format!("{SELECT_USER} WHERE u.email = ?");
        let user = query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn find_all_paged(
        &self,
        page: PageRequest<UserSort>,
    ) -> Result<(Vec<UserRow>, u64), CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let total = query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM `user`"#)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let sql = format!(
            "{SELECT_USER} ORDER BY {} LIMIT ? OFFSET ?",
            page.order_by("u.")
        );
        let users = query_as::<_, UserRow>(&sql)
            .bind(page.size as u64)
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok((users, total as u64))
    }

    async fn insert(&self, record: &UserRecord, password_hash: &str) -> Result<UserRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = query(
            r#"
            INSERT INTO `user` (first_name, last_name, email, password)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(password_hash)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_id() as i64;
        Self::replace_role_links(&mut tx, id, &record.role_ids).await?;
        let user = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(user)
    }

    async fn update(&self, id: i64, record: &UserRecord) -> Result<UserRow, CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        query_scalar::<_, i64>(r#"SELECT id FROM `user` WHERE id = ? FOR UPDATE"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CatalogRepositoryError::NotFound)?;

        query(
            r#"
            UPDATE `user`
            SET first_name = ?, last_name = ?, email = ?
            WHERE id = ?
            "#
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        Self::replace_role_links(&mut tx, id, &record.role_ids).await?;
        let user = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), CatalogRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        query(r#"DELETE FROM user_role WHERE user_id = ?"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let result = query(
            r#"
            DELETE FROM `user` WHERE id = ?
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
