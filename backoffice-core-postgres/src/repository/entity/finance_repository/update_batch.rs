use async_trait::async_trait;
use backoffice_core_db::models::entity::FinanceModel;
use backoffice_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::FinanceRepositoryImpl;

impl FinanceRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &FinanceRepositoryImpl,
        items: Vec<FinanceModel>,
    ) -> Result<Vec<FinanceModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE finance SET name = $2, flow = $3, category = $4, amount = $5, transaction_date = $6, work_program_id = $7, proof = $8, status = $9, updated_at = $10
                WHERE id = $1
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
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Finance {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, FinanceModel> for FinanceRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<FinanceModel>,
    ) -> Result<Vec<FinanceModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::entity::test_utils::create_test_finance;
    use crate::test_helper::setup_test_context;
    use backoffice_core_db::repository::create_batch::CreateBatch;
    use backoffice_core_db::repository::load_batch::LoadBatch;
    use backoffice_core_db::repository::update_batch::UpdateBatch;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let finance_repo = &ctx.entity_repos().finance_repository;

        let mut item = finance_repo.create_batch(vec![create_test_finance()]).await?.remove(0);
        item.amount = Decimal::new(99_50, 2);
        item.proof = None;
        finance_repo.update_batch(vec![item.clone()]).await?;

        let loaded = finance_repo.load_batch(&[item.id]).await?;
        assert_eq!(loaded[0].as_ref(), Some(&item));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_fails() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let finance_repo = &ctx.entity_repos().finance_repository;

        assert!(finance_repo.update_batch(vec![create_test_finance()]).await.is_err());

        Ok(())
    }
}
