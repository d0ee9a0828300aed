use async_trait::async_trait;
use backoffice_core_db::models::activity::ActivityLogModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ActivityLogRepositoryImpl;

impl ActivityLogRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ActivityLogRepositoryImpl,
        items: Vec<ActivityLogModel>,
    ) -> Result<Vec<ActivityLogModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO activity_log (id, user_id, activity_type, entity_type, entity_id, description, metadata, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.activity_type)
            .bind(item.entity_type)
            .bind(item.entity_id)
            .bind(item.description.as_str())
            .bind(&item.metadata)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ActivityLogModel> for ActivityLogRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ActivityLogModel>,
    ) -> Result<Vec<ActivityLogModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
