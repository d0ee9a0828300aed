use async_trait::async_trait;
use backoffice_core_db::models::entity::LetterModel;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct LetterRepositoryImpl {
    pub executor: Executor,
}

impl LetterRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for LetterModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(LetterModel {
            id: row.try_get("id")?,
            number: get_heapless_string(row, "number")?,
            subject: get_heapless_string(row, "subject")?,
            recipient: get_heapless_string(row, "recipient")?,
            direction: row.try_get("direction")?,
            letter_date: row.try_get("letter_date")?,
            content: row.try_get("content")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for LetterRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
