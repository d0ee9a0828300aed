use async_trait::async_trait;
use sqlx::Database;

use crate::models::asset::AssetCleanupJobModel;

/// Journaled deletions that have not completed yet
#[async_trait]
pub trait FindPendingCleanupJobs<DB: Database>: Send + Sync {
    /// Pending jobs ordered by `not_before`, at most `limit` of them
    async fn find_pending(
        &self,
        limit: usize,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn std::error::Error + Send + Sync>>;
}
