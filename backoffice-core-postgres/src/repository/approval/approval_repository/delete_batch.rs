use async_trait::async_trait;
use backoffice_core_db::repository::delete_batch::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &ApprovalRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        // approval_history is left in place on purpose
        let result = sqlx::query(r#"DELETE FROM approval WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for ApprovalRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
