use thiserror::Error;

/// Errors from the store layer. `MissingField` is the only condition that
/// rejects a write; bad numeric values and unknown statuses are normalized,
/// never errored.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
