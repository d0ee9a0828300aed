use async_trait::async_trait;
use backoffice_core_db::models::entity::DocumentModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::DocumentRepositoryImpl;

impl DocumentRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &DocumentRepositoryImpl,
        items: Vec<DocumentModel>,
    ) -> Result<Vec<DocumentModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO document (id, name, category, content, work_program_id, status, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.category)
            .bind(item.content.as_deref())
            .bind(item.work_program_id)
            .bind(item.status)
            .bind(item.user_id)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, DocumentModel> for DocumentRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<DocumentModel>,
    ) -> Result<Vec<DocumentModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
