use async_trait::async_trait;
use backoffice_core_db::models::approval::{ApprovalHistoryModel, ApprovalModel};
use crate::utils::TryFromRow;
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ApprovalRepositoryImpl {
    pub executor: Executor,
}

impl ApprovalRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ApprovalModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ApprovalModel {
            id: row.try_get("id")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            user_id: row.try_get("user_id")?,
            status: row.try_get("status")?,
            note: row.try_get("note")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFromRow<PgRow> for ApprovalHistoryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ApprovalHistoryModel {
            id: row.try_get("id")?,
            approval_id: row.try_get("approval_id")?,
            entity_type: row.try_get("entity_type")?,
            entity_id: row.try_get("entity_id")?,
            status: row.try_get("status")?,
            note: row.try_get("note")?,
            actor_id: row.try_get("actor_id")?,
            recorded_at: row.try_get("recorded_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for ApprovalRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
