use async_trait::async_trait;
use backoffice_core_db::models::entity::WorkProgramModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct WorkProgramRepositoryImpl {
    pub executor: Executor,
}

impl WorkProgramRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for WorkProgramModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(WorkProgramModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            description: row.try_get("description")?,
            person_in_charge: get_optional_heapless_string(row, "person_in_charge")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            budget: row.try_get("budget")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for WorkProgramRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
