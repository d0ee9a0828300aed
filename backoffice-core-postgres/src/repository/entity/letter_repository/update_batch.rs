use async_trait::async_trait;
use backoffice_core_db::models::entity::LetterModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::LetterRepositoryImpl;

impl LetterRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &LetterRepositoryImpl,
        items: Vec<LetterModel>,
    ) -> Result<Vec<LetterModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE letter SET number = $2, subject = $3, recipient = $4, direction = $5, letter_date = $6, content = $7, status = $8, updated_at = $9
                WHERE id = $1
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
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Letter {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, LetterModel> for LetterRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<LetterModel>,
    ) -> Result<Vec<LetterModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
