use async_trait::async_trait;
use backoffice_core_db::models::entity::LetterModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::LetterRepositoryImpl;

impl LetterRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &LetterRepositoryImpl,
        items: Vec<LetterModel>,
    ) -> Result<Vec<LetterModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO letter (id, number, subject, recipient, direction, letter_date, content, status, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(item.id)
            .bind(item.number.as_str())
            .bind(item.subject.as_str())
            .bind(item.recipient.as_str())
            .bind(item.direction)
            .bind(item.letter_date)
            .bind(item.content.as_deref())
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
impl CreateBatch<Postgres, LetterModel> for LetterRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<LetterModel>,
    ) -> Result<Vec<LetterModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
