use async_trait::async_trait;
use backoffice_core_db::models::entity::DocumentModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::DocumentRepositoryImpl;

impl DocumentRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &DocumentRepositoryImpl,
        items: Vec<DocumentModel>,
    ) -> Result<Vec<DocumentModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE document SET name = $2, category = $3, content = $4, work_program_id = $5, status = $6, updated_at = $7
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.category)
            .bind(item.content.as_deref())
            .bind(item.work_program_id)
            .bind(item.status)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Document {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, DocumentModel> for DocumentRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<DocumentModel>,
    ) -> Result<Vec<DocumentModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
