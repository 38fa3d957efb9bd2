use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("error while executing database query")]
    Database(#[source] diesel::result::Error),
    #[error("failed to check out a database connection")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to run migrations: {0}")]
    Migration(String),
}

impl From<diesel::result::Error> for CatalogError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error::DatabaseError;

        match err {
            DatabaseError(
                kind @ (DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::UniqueViolation),
                info,
            ) => CatalogError::Validation(ValidationError::Integrity {
                kind: format!("{kind:?}"),
                message: info.message().to_string(),
            }),
            err => CatalogError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::Error;

    #[test]
    fn integrity_violation_becomes_validation_error() {
        let err = Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("FOREIGN KEY constraint failed".to_string()),
        );
        assert!(matches!(
            CatalogError::from(err),
            CatalogError::Validation(ValidationError::Integrity { .. })
        ));
    }

    #[test]
    fn other_database_errors_stay_database_errors() {
        assert!(matches!(
            CatalogError::from(Error::RollbackTransaction),
            CatalogError::Database(_)
        ));
    }
}
