use async_trait::async_trait;
use backoffice_core_db::repository::exist_by_ids::ExistByIds;
use sqlx::Postgres;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::WorkProgramRepositoryImpl;

impl WorkProgramRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &WorkProgramRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<Uuid> = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_scalar(r#"SELECT id FROM work_program WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let found: HashSet<Uuid> = found.into_iter().collect();
        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres> for WorkProgramRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
