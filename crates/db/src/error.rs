use verkefni_core::error::CoreError;

/// Failure of a repository operation: a domain outcome (not found,
/// validation) or an underlying database error, which is propagated
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
