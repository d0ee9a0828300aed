use async_trait::async_trait;
use backoffice_core_db::models::entity::FinanceModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct FinanceRepositoryImpl {
    pub executor: Executor,
}

impl FinanceRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for FinanceModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(FinanceModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            flow: row.try_get("flow")?,
            category: get_heapless_string(row, "category")?,
            amount: row.try_get("amount")?,
            transaction_date: row.try_get("transaction_date")?,
            work_program_id: row.try_get("work_program_id")?,
            proof: get_optional_heapless_string(row, "proof")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for FinanceRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
