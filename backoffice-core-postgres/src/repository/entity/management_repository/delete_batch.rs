use async_trait::async_trait;
use backoffice_core_db::repository::delete_batch::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ManagementRepositoryImpl;

impl ManagementRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &ManagementRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(r#"DELETE FROM management WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for ManagementRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::entity::test_utils::create_test_management;
    use crate::test_helper::setup_test_context;
    use backoffice_core_db::repository::create_batch::CreateBatch;
    use backoffice_core_db::repository::delete_batch::DeleteBatch;
    use backoffice_core_db::repository::load_batch::LoadBatch;

    #[tokio::test]
    async fn test_delete_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let management_repo = &ctx.entity_repos().management_repository;

        let item = create_test_management();
        management_repo.create_batch(vec![item.clone()]).await?;

        assert_eq!(management_repo.delete_batch(&[item.id]).await?, 1);
        assert_eq!(management_repo.delete_batch(&[item.id]).await?, 0);
        assert!(management_repo.load_batch(&[item.id]).await?[0].is_none());

        Ok(())
    }
}
