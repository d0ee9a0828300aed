use async_trait::async_trait;
use backoffice_core_api::domain::AuditEntityType;
use sqlx::Database;
use uuid::Uuid;

use crate::models::activity::ActivityLogModel;
use crate::repository::pagination::{Page, PageRequest};

/// Activity entries recorded against one entity, newest first
#[async_trait]
pub trait FindActivityByEntity<DB: Database>: Send + Sync {
    async fn find_by_entity(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ActivityLogModel>, Box<dyn std::error::Error + Send + Sync>>;
}
