/// Error types for post-service
use thiserror::Error;

/// Failure reported by a store collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// Translate Postgres constraint violations into store-level outcomes.
    ///
    /// 23505 (unique_violation) becomes `Conflict`, 23503 (foreign_key_violation)
    /// becomes `NotFound`; anything else stays a database error.
    pub fn from_constraint(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::Conflict,
                Some("23503") => return StoreError::NotFound,
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{store} store error during {operation}: {source}")]
    Store {
        store: &'static str,
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn store(store: &'static str, operation: &'static str, source: StoreError) -> Self {
        ServiceError::Store {
            store,
            operation,
            source,
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Attach store/operation context to a store result.
pub trait StoreContext<T> {
    /// Every failure, `NotFound` included, becomes a labelled store error.
    fn in_store(self, store: &'static str, operation: &'static str) -> ServiceResult<T>;

    /// `NotFound` becomes `ServiceError::NotFound(what)`; other failures are labelled.
    fn or_not_found(
        self,
        store: &'static str,
        operation: &'static str,
        what: impl FnOnce() -> String,
    ) -> ServiceResult<T>;
}

impl<T> StoreContext<T> for StoreResult<T> {
    fn in_store(self, store: &'static str, operation: &'static str) -> ServiceResult<T> {
        self.map_err(|e| ServiceError::store(store, operation, e))
    }

    fn or_not_found(
        self,
        store: &'static str,
        operation: &'static str,
        what: impl FnOnce() -> String,
    ) -> ServiceResult<T> {
        match self {
            Ok(value) => Ok(value),
            Err(StoreError::NotFound) => Err(ServiceError::NotFound(what())),
            Err(e) => Err(ServiceError::store(store, operation, e)),
        }
    }
}
