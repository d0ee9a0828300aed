use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for hard-deleting entities by id
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    /// Returns the number of rows actually deleted
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
