use crate::dto::{UserDto, UserInsertDto, UserUpdateDto};
use crate::errors_service::CatalogServiceError;
use crate::pagination::{Page, PageRequest, UserSort};
use crate::password::hash_password;
use crate::repository::models::{RoleRow, UserRecord, UserRow};
use crate::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use crate::repository::{RoleRepository, UserRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Login identity of a user: the stored password hash plus granted authorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UserService<U = UserRepository, R = RoleRepository>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
{
    pub user_repo: Arc<U>,
    pub role_repo: Arc<R>,
}

impl UserService<UserRepository, RoleRepository> {
    pub fn new(user_repo: UserRepository, role_repo: RoleRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            role_repo: Arc::new(role_repo),
        }
    }
}

impl<U, R> UserService<U, R>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
{
    pub fn with_repos(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            role_repo,
        }
    }

    async fn resolve_roles(&self, ids: &[i64]) -> Result<Vec<RoleRow>, CatalogServiceError> {
        let mut found = self
            .role_repo
            .find_by_ids(ids)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "role"))?;

        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|r| r.id == **id)) {
            return Err(CatalogServiceError::NotFound(format!("Role not found! Id: {missing}")));
        }
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn roles_by_user(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<RoleRow>>, CatalogServiceError> {
        let mappings = self
            .role_repo
            .find_for_users(user_ids)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "role"))?;

        let mut roles_by_user: HashMap<i64, Vec<RoleRow>> = HashMap::new();
        for mapping in mappings {
            roles_by_user.entry(mapping.user_id).or_default().push(RoleRow {
                id: mapping.role_id,
                authority: mapping.authority,
            });
        }
        Ok(roles_by_user)
    }

    async fn with_roles(&self, rows: Vec<UserRow>) -> Result<Vec<UserDto>, CatalogServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut roles_by_user = self.roles_by_user(&user_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let roles = roles_by_user.remove(&row.id).unwrap_or_default();
                UserDto::from_row_with_roles(row, roles)
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<UserDto, CatalogServiceError> {
        let row = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "user"))?
            .ok_or_else(|| {
                CatalogServiceError::NotFound(format!("Object not found! Id: {id}, Type: UserDto"))
            })?;
        let roles = self.roles_by_user(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(UserDto::from_row_with_roles(row, roles))
    }

    pub async fn find_all_paged(&self, page: PageRequest<UserSort>) -> Result<Page<UserDto>, CatalogServiceError> {
        let (rows, total) = self
            .user_repo
            .find_all_paged(page)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "user"))?;

        let content = self.with_roles(rows).await?;
        Ok(Page::new(content, total, &page))
    }

    pub async fn create(&self, dto: &UserInsertDto) -> Result<UserDto, CatalogServiceError> {
        let role_ids = dto.role_ids();
        let roles = self.resolve_roles(&role_ids).await?;
        let password_hash = hash_password(&dto.password)?;

        let record = UserRecord {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            email: dto.email.trim().to_string(),
            role_ids,
        };
        let row = self
            .user_repo
            .insert(&record, &password_hash)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "user"))?;

        info!(user_id = row.id, "user created");
        Ok(UserDto::from_row_with_roles(row, roles))
    }

    pub async fn update(&self, id: i64, dto: &UserUpdateDto) -> Result<UserDto, CatalogServiceError> {
        let role_ids = dto.role_ids();
        let roles = self.resolve_roles(&role_ids).await?;

        let record = UserRecord {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            email: dto.email.trim().to_string(),
            role_ids,
        };
        let row = self
            .user_repo
            .update(id, &record)
            .await
            .map_err(|e| CatalogServiceError::from_write(e, "user", id))?;

        info!(user_id = id, "user updated");
        Ok(UserDto::from_row_with_roles(row, roles))
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogServiceError> {
        self.user_repo
            .delete(id)
            .await
            .map_err(|e| CatalogServiceError::from_delete(e, "user", id))?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Looks up the login identity for `email`, matched exactly.
    pub async fn load_by_identity(&self, email: &str) -> Result<UserIdentity, CatalogServiceError> {
        let row = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "user"))?;

        let Some(row) = row else {
            error!(email, "Email not found");
            return Err(CatalogServiceError::IdentityNotFound(email.to_string()));
        };

        let authorities = self
            .roles_by_user(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.authority)
            .collect();

        info!(email, "User found");
        Ok(UserIdentity {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            authorities,
        })
    }
}
