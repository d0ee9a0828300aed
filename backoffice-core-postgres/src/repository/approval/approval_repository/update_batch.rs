use async_trait::async_trait;
use backoffice_core_db::models::approval::ApprovalModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    /// Rewrites status, note and `updated_at`; entity binding and
    /// submitter are immutable.
    pub(super) async fn update_batch_impl(
        repo: &ApprovalRepositoryImpl,
        items: Vec<ApprovalModel>,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE approval SET status = $2, note = $3, updated_at = $4
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.status)
            .bind(item.note.as_deref())
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Approval {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ApprovalModel> for ApprovalRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ApprovalModel>,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
