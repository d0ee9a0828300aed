use async_trait::async_trait;
use backoffice_core_db::models::entity::WorkProgramModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::WorkProgramRepositoryImpl;

impl WorkProgramRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &WorkProgramRepositoryImpl,
        items: Vec<WorkProgramModel>,
    ) -> Result<Vec<WorkProgramModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO work_program (id, name, description, person_in_charge, start_date, end_date, budget, status, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
impl CreateBatch<Postgres, WorkProgramModel> for WorkProgramRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<WorkProgramModel>,
    ) -> Result<Vec<WorkProgramModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
