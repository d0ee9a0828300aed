use async_trait::async_trait;
use backoffice_core_db::models::activity::ActivityLogModel;
use crate::utils::TryFromRow;
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// Append-only store of activity entries; there is no update or delete.
pub struct ActivityLogRepositoryImpl {
    pub executor: Executor,
}

impl ActivityLogRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ActivityLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ActivityLogModel {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            activity_type: row.try_get("activity_type")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            description: row.try_get("description")?,
            metadata: row.try_get("metadata")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for ActivityLogRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
