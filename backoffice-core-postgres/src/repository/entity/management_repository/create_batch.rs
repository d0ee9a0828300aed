use async_trait::async_trait;
use backoffice_core_db::models::entity::ManagementModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ManagementRepositoryImpl;

impl ManagementRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ManagementRepositoryImpl,
        items: Vec<ManagementModel>,
    ) -> Result<Vec<ManagementModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO management (id, name, period_start, period_end, decree, structure, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.period_start)
            .bind(item.period_end)
            .bind(item.decree.as_deref())
            .bind(item.structure.as_deref())
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
impl CreateBatch<Postgres, ManagementModel> for ManagementRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ManagementModel>,
    ) -> Result<Vec<ManagementModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::entity::test_utils::create_test_management;
    use crate::test_helper::setup_test_context;
    use backoffice_core_db::repository::create_batch::CreateBatch;
    use backoffice_core_db::repository::load_batch::LoadBatch;

    #[tokio::test]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let management_repo = &ctx.entity_repos().management_repository;

        let first = create_test_management();
        let second = create_test_management();
        let saved = management_repo.create_batch(vec![first.clone(), second.clone()]).await?;
        assert_eq!(saved.len(), 2);

        let loaded = management_repo.load_batch(&[first.id, second.id]).await?;
        assert_eq!(loaded[0].as_ref(), Some(&first));
        assert_eq!(loaded[1].as_ref(), Some(&second));

        Ok(())
    }
}
