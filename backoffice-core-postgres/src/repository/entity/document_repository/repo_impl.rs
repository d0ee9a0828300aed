use async_trait::async_trait;
use backoffice_core_db::models::entity::DocumentModel;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct DocumentRepositoryImpl {
    pub executor: Executor,
}

impl DocumentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for DocumentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DocumentModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            category: row.try_get("category")?,
            content: row.try_get("content")?,
            work_program_id: row.try_get("work_program_id")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for DocumentRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
