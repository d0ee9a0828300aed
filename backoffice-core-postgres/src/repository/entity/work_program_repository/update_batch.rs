use async_trait::async_trait;
use backoffice_core_db::models::entity::WorkProgramModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::WorkProgramRepositoryImpl;

impl WorkProgramRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &WorkProgramRepositoryImpl,
        items: Vec<WorkProgramModel>,
    ) -> Result<Vec<WorkProgramModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE work_program SET name = $2, description = $3, person_in_charge = $4, start_date = $5, end_date = $6, budget = $7, status = $8, updated_at = $9
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.description.as_deref())
            .bind(item.person_in_charge.as_deref())
            .bind(item.start_date)
            .bind(item.end_date)
            .bind(item.budget)
            .bind(item.status)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("WorkProgram {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, WorkProgramModel> for WorkProgramRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<WorkProgramModel>,
    ) -> Result<Vec<WorkProgramModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
