use async_trait::async_trait;
use backoffice_core_db::models::entity::ManagementModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ManagementRepositoryImpl {
    pub executor: Executor,
}

impl ManagementRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ManagementModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ManagementModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            period_start: row.try_get("period_start")?,
            period_end: row.try_get("period_end")?,
            decree: get_optional_heapless_string(row, "decree")?,
            structure: get_optional_heapless_string(row, "structure")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for ManagementRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
