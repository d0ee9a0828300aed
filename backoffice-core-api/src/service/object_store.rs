use async_trait::async_trait;
use thiserror::Error;

use crate::domain::asset::LocalFile;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object store request failed: {0}")]
    Request(String),
}

/// External blob storage consumed by the asset reconciliation protocol.
///
/// Each call is treated as an atomic primitive. Implementations must be safe
/// to retry after an ambiguous failure; the core itself only retries deletes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `file` as `name` into `folder_id`, returning the new object id
    async fn upload(&self, file: &LocalFile, name: &str, folder_id: &str) -> Result<String, ObjectStoreError>;

    async fn rename(&self, object_id: &str, new_name: &str) -> Result<bool, ObjectStoreError>;

    /// Make the object readable by anyone holding its link
    async fn set_public_access(&self, object_id: &str) -> Result<bool, ObjectStoreError>;

    async fn delete(&self, object_id: &str) -> Result<bool, ObjectStoreError>;
}
