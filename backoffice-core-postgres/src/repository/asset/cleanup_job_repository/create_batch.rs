use async_trait::async_trait;
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CleanupJobRepositoryImpl;

impl CleanupJobRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CleanupJobRepositoryImpl,
        items: Vec<AssetCleanupJobModel>,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO asset_cleanup_job (id, object_id, asset_class, not_before, attempts, last_error, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(item.object_id.as_str())
            .bind(item.asset_class)
            .bind(item.not_before)
            .bind(item.attempts)
            .bind(item.last_error.as_deref())
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, AssetCleanupJobModel> for CleanupJobRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AssetCleanupJobModel>,
    ) -> Result<Vec<AssetCleanupJobModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
