use async_trait::async_trait;
use backoffice_core_db::models::entity::FinanceModel;
use backoffice_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::FinanceRepositoryImpl;

impl FinanceRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &FinanceRepositoryImpl,
        items: Vec<FinanceModel>,
    ) -> Result<Vec<FinanceModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO finance (id, name, flow, category, amount, transaction_date, work_program_id, proof, status, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.flow)
            .bind(item.category.as_str())
            .bind(item.amount)
            .bind(item.transaction_date)
            .bind(item.work_program_id)
            .bind(item.proof.as_deref())
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
impl CreateBatch<Postgres, FinanceModel> for FinanceRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<FinanceModel>,
    ) -> Result<Vec<FinanceModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::entity::test_utils::create_test_finance;
    use crate::test_helper::setup_test_context;
    use backoffice_core_db::repository::create_batch::CreateBatch;
    use backoffice_core_db::repository::load_batch::LoadBatch;

    #[tokio::test]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let finance_repo = &ctx.entity_repos().finance_repository;

        let first = create_test_finance();
        let second = create_test_finance();
        let saved = finance_repo.create_batch(vec![first.clone(), second.clone()]).await?;
        assert_eq!(saved.len(), 2);

        let loaded = finance_repo.load_batch(&[first.id, second.id]).await?;
        assert_eq!(loaded[0].as_ref(), Some(&first));
        assert_eq!(loaded[1].as_ref(), Some(&second));

        Ok(())
    }
}
