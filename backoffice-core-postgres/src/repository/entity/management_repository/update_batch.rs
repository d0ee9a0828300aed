use async_trait::async_trait;
use backoffice_core_db::models::entity::ManagementModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ManagementRepositoryImpl;

impl ManagementRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ManagementRepositoryImpl,
        items: Vec<ManagementModel>,
    ) -> Result<Vec<ManagementModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE management SET name = $2, period_start = $3, period_end = $4, decree = $5, structure = $6, updated_at = $7
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.period_start)
            .bind(item.period_end)
            .bind(item.decree.as_deref())
            .bind(item.structure.as_deref())
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Management {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ManagementModel> for ManagementRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ManagementModel>,
    ) -> Result<Vec<ManagementModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
