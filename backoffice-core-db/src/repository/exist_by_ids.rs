use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for checking existence of entities by id
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    /// Returns `(id, exists)` for every requested id, in request order
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
