//! HTTP handlers. Service calls are synchronous and hold the store lock, so
//! every one runs on the blocking pool.

pub mod admin;
pub mod public;

use crate::domain::error::ApiError;
use shared_types::NamingError;

pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, NamingError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("worker task failed: {}", e)))?
        .map_err(ApiError::from)
}
