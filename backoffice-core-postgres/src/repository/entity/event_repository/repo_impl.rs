use async_trait::async_trait;
use backoffice_core_db::models::entity::EventModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::{Executor, TransactionAware, TransactionResult};
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct EventRepositoryImpl {
    pub executor: Executor,
}

impl EventRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for EventModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(EventModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            description: row.try_get("description")?,
            category: get_heapless_string(row, "category")?,
            starts_at: row.try_get("starts_at")?,
            ends_at: row.try_get("ends_at")?,
            location: get_optional_heapless_string(row, "location")?,
            work_program_id: row.try_get("work_program_id")?,
            thumbnail: get_optional_heapless_string(row, "thumbnail")?,
            status: row.try_get("status")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl TransactionAware for EventRepositoryImpl {
    async fn on_commit(&self) -> TransactionResult<()> {
        Ok(())
    }

    async fn on_rollback(&self) -> TransactionResult<()> {
        Ok(())
    }
}
