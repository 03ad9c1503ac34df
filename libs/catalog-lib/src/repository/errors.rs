#[derive(Debug)]
pub enum CatalogRepositoryError {
    NotFound,
    DuplicateEntry(String),
    ForeignKeyViolation,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for CatalogRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogRepositoryError::NotFound => write!(f, "not found"),
            CatalogRepositoryError::DuplicateEntry(key) => write!(f, "duplicate entry for key '{key}'"),
            CatalogRepositoryError::ForeignKeyViolation => write!(f, "foreign key constraint fails"),
            CatalogRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CatalogRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogRepositoryError::NotFound => None,
            CatalogRepositoryError::DuplicateEntry(_) => None,
            CatalogRepositoryError::ForeignKeyViolation => None,
            CatalogRepositoryError::Sqlx(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for CatalogRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Classifies MySQL integrity failures (SQLSTATE 23000).
///
/// - 1062 "Duplicate entry '...' for key 'user.user_email_unique'"
/// - 1451 "Cannot delete or update a parent row: a foreign key constraint fails (...)"
/// - 1452 "Cannot add or update a child row: a foreign key constraint fails (...)"
pub fn map_sqlx_error(err: sqlx::Error) -> CatalogRepositoryError {
    if let sqlx::Error::RowNotFound = err {
        return CatalogRepositoryError::NotFound;
    }

    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23000") {
            let msg = db_err.message().to_lowercase();

            if msg.contains("duplicate entry") && msg.contains("for key") {
                // MySQL prefixes the key with the table name, keep only the constraint.
                let key = extract_mysql_key_name(&msg).unwrap_or_default();
                let key = key.rsplit('.').next().unwrap_or_default().to_string();
                return CatalogRepositoryError::DuplicateEntry(key);
            }

            if msg.contains("foreign key constraint fails") {
                return CatalogRepositoryError::ForeignKeyViolation;
            }
        }
    }

    CatalogRepositoryError::Sqlx(err)
}
