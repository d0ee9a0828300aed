use async_trait::async_trait;
use backoffice_core_db::models::approval::ApprovalModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ApprovalRepositoryImpl;

impl ApprovalRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ApprovalRepositoryImpl,
        items: Vec<ApprovalModel>,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO approval (id, entity_type, entity_id, user_id, status, note, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.entity_type)
            .bind(item.entity_id)
            .bind(item.user_id)
            .bind(item.status)
            .bind(item.note.as_deref())
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ApprovalModel> for ApprovalRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ApprovalModel>,
    ) -> Result<Vec<ApprovalModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
