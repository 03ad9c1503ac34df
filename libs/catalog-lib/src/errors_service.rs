use crate::repository::errors::CatalogRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Integrity(String),

    #[error("Email not found! {0}")]
    IdentityNotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CatalogServiceError {
    /// Maps a read or insert failure on `entity` ("product", "category", "user").
    /// A foreign key failure here means a referenced row vanished after it was resolved.
    pub(crate) fn from_repo(err: CatalogRepositoryError, entity: &str) -> Self {
        match err {
            CatalogRepositoryError::NotFound => {
                CatalogServiceError::NotFound(format!("{entity} not found"))
            }
            CatalogRepositoryError::DuplicateEntry(key) => CatalogServiceError::Integrity(format!(
                "Duplicate value violates unique key {key}"
            )),
            CatalogRepositoryError::ForeignKeyViolation => CatalogServiceError::NotFound(format!(
                "A record referenced by this {entity} no longer exists"
            )),
            CatalogRepositoryError::Sqlx(e) => CatalogServiceError::Internal(e.into()),
        }
    }

    /// Maps an update failure for `id`.
    pub(crate) fn from_write(err: CatalogRepositoryError, entity: &str, id: i64) -> Self {
        match err {
            CatalogRepositoryError::NotFound => {
                CatalogServiceError::NotFound(format!("Id not found! Id: {id}"))
            }
            other => Self::from_repo(other, entity),
        }
    }

    /// Maps a delete failure for `id`. Rows still referenced elsewhere are an `Integrity` error.
    pub(crate) fn from_delete(err: CatalogRepositoryError, entity: &str, id: i64) -> Self {
        match err {
            CatalogRepositoryError::ForeignKeyViolation => CatalogServiceError::Integrity(format!(
                "{entity} cannot be deleted! it has associated records"
            )),
            other => Self::from_write(other, entity, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_not_found_names_the_id() {
        let err = CatalogServiceError::from_write(CatalogRepositoryError::NotFound, "product", 1000);
        assert_eq!(err.to_string(), "Id not found! Id: 1000");
        let err = CatalogServiceError::from_delete(CatalogRepositoryError::NotFound, "product", 1000);
        assert_eq!(err.to_string(), "Id not found! Id: 1000");
    }

    #[test]
    fn delete_foreign_key_violation_is_an_integrity_error() {
        let err = CatalogServiceError::from_delete(CatalogRepositoryError::ForeignKeyViolation, "category", 1);
        assert!(matches!(err, CatalogServiceError::Integrity(_)));
        assert_eq!(err.to_string(), "category cannot be deleted! it has associated records");
    }

    #[test]
    fn save_foreign_key_violation_is_a_missing_reference() {
        let err = CatalogServiceError::from_repo(CatalogRepositoryError::ForeignKeyViolation, "product");
        assert!(matches!(err, CatalogServiceError::NotFound(_)));
        assert!(!err.to_string().contains("cannot be deleted"));

        let err = CatalogServiceError::from_write(CatalogRepositoryError::ForeignKeyViolation, "user", 2);
        assert!(matches!(err, CatalogServiceError::NotFound(_)));
        assert!(!err.to_string().contains("cannot be deleted"));
    }

    #[test]
    fn duplicate_entry_names_the_key() {
        let err = CatalogServiceError::from_repo(
            CatalogRepositoryError::DuplicateEntry("user_email_unique".to_string()),
            "user",
        );
        assert!(matches!(err, CatalogServiceError::Integrity(_)));
        assert_eq!(err.to_string(), "Duplicate value violates unique key user_email_unique");
    }
}
