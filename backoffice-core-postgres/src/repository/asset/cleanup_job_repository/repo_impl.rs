use async_trait::async_trait;
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use crate::utils::TryFromRow;
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct CleanupJobRepositoryImpl {
    pub executor: Executor,
}

impl CleanupJobRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for AssetCleanupJobModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AssetCleanupJobModel {
            id: row.try_get("id")?,
            object_id: row.try_get("object_id")?,
            asset_class: row.try_get("asset_class")?,
            not_before: row.try_get("not_before")?,
            attempts: row.try_get("attempts")?,
            last_error: row.try_get("last_error")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for CleanupJobRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
