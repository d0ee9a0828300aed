use async_trait::async_trait;
use backoffice_core_db::models::entity::EventModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::EventRepositoryImpl;

impl EventRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &EventRepositoryImpl,
        items: Vec<EventModel>,
    ) -> Result<Vec<EventModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO event (id, name, description, category, starts_at, ends_at, location, work_program_id, thumbnail, status, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
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
impl CreateBatch<Postgres, EventModel> for EventRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<EventModel>,
    ) -> Result<Vec<EventModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
