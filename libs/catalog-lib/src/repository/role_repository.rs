use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::repository::errors::{map_sqlx_error, CatalogRepositoryError};
use crate::repository::models::{RoleRow, UserRoleMapping};
use crate::repository::traits::RoleRepositoryTrait;

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pub pool: MySqlPool,
}

impl RoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<RoleRow>, CatalogRepositoryError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT id, authority FROM role WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let roles = builder
            .build_query_as::<RoleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(roles)
    }

    async fn find_for_users(&self, user_ids: &[i64]) -> Result<Vec<UserRoleMapping>, CatalogRepositoryError> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(
            r#"
            SELECT ur.user_id, r.id AS role_id, r.authority
            FROM user_role ur
            INNER JOIN role r ON r.id = ur.role_id
            WHERE ur.user_id IN ("#,
        );
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY ur.user_id, r.id");

        let mappings = builder
            .build_query_as::<UserRoleMapping>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(mappings)
    }
}
