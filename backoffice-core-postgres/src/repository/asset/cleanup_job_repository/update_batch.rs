use async_trait::async_trait;
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CleanupJobRepositoryImpl;

impl CleanupJobRepositoryImpl {
    /// Records a failed attempt: attempt counter, next run time and error
    pub(super) async fn update_batch_impl(
        repo: &CleanupJobRepositoryImpl,
        items: Vec<AssetCleanupJobModel>,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE asset_cleanup_job SET not_before = $2, attempts = $3, last_error = $4
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.not_before)
            .bind(item.attempts)
            .bind(item.last_error.as_deref())
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Cleanup job {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, AssetCleanupJobModel> for CleanupJobRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<AssetCleanupJobModel>,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
