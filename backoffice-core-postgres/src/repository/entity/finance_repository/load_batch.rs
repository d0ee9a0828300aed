use async_trait::async_trait;
use backoffice_core_db::models::entity::FinanceModel;
use backoffice_core_db::repository::load_batch::LoadBatch;
use crate::utils::{order_by_ids, TryFromRow};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::FinanceRepositoryImpl;

impl FinanceRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &FinanceRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<FinanceModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM finance WHERE id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let items = rows
            .iter()
            .map(FinanceModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(order_by_ids(ids, items, |item| item.id))
    }
}

#[async_trait]
impl LoadBatch<Postgres, FinanceModel> for FinanceRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<FinanceModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
