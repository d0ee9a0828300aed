use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for updating multiple entities in a batch
///
/// # Example
/// ```ignore
/// impl UpdateBatch<Postgres, FinanceModel> for FinanceRepositoryImpl {
///     async fn update_batch(&self, items: Vec<FinanceModel>) -> Result<Vec<FinanceModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Update multiple items
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The updated entities
    /// * `Err` - An error if any item is missing or the write failed
    async fn update_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
