use async_trait::async_trait;
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use backoffice_core_db::repository::cleanup_job::FindPendingCleanupJobs;
use crate::utils::{to_sql_bigint, TryFromRow};
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CleanupJobRepositoryImpl;

impl CleanupJobRepositoryImpl {
    pub(super) async fn find_pending_impl(
        repo: &CleanupJobRepositoryImpl,
        limit: usize,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM asset_cleanup_job ORDER BY not_before ASC, id ASC LIMIT $1"#)
                .bind(to_sql_bigint(limit))
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(AssetCleanupJobModel::try_from_row).collect()
    }
}

#[async_trait]
impl FindPendingCleanupJobs<Postgres> for CleanupJobRepositoryImpl {
    async fn find_pending(
        &self,
        limit: usize,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        Self::find_pending_impl(self, limit).await
    }
}
