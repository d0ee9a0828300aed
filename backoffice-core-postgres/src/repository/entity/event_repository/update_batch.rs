use async_trait::async_trait;
use backoffice_core_db::models::entity::EventModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::EventRepositoryImpl;

impl EventRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &EventRepositoryImpl,
        items: Vec<EventModel>,
    ) -> Result<Vec<EventModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE event SET name = $2, description = $3, category = $4, starts_at = $5, ends_at = $6, location = $7, work_program_id = $8, thumbnail = $9, status = $10, updated_at = $11
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.description.as_deref())
            .bind(item.category.as_str())
            .bind(item.starts_at)
            .bind(item.ends_at)
            .bind(item.location.as_deref())
            .bind(item.work_program_id)
            .bind(item.thumbnail.as_deref())
            .bind(item.status)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Event {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, EventModel> for EventRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<EventModel>,
    ) -> Result<Vec<EventModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
