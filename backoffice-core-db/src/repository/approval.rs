use async_trait::async_trait;
use backoffice_core_api::domain::{ApprovalEntityType, ApprovalFilter};
use sqlx::Database;
use uuid::Uuid;

use crate::models::approval::{latest_approval, ApprovalHistoryModel, ApprovalModel};
use crate::repository::pagination::{Page, PageRequest};

/// Lookups of approvals by the entity they review
#[async_trait]
pub trait FindApprovalByEntity<DB: Database>: Send + Sync {
    /// First approval opened by `user_id` against the entity, if any
    async fn find_by_entity_and_user(
        &self,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ApprovalModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Every approval of the entity under any of `entity_types`, latest first
    async fn find_by_entity(
        &self,
        entity_types: &[ApprovalEntityType],
        entity_id: Uuid,
    ) -> Result<Vec<ApprovalModel>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Latest approval of an entity across the given tags
pub async fn find_latest_by_entity<DB, R>(
    repo: &R,
    entity_types: &[ApprovalEntityType],
    entity_id: Uuid,
) -> Result<Option<ApprovalModel>, Box<dyn std::error::Error + Send + Sync>>
where
    DB: Database,
    R: FindApprovalByEntity<DB> + ?Sized,
{
    let approvals = repo.find_by_entity(entity_types, entity_id).await?;
    Ok(latest_approval(&approvals).cloned())
}

/// Filtered, paginated listing of approvals, newest first
#[async_trait]
pub trait ListApprovals<DB: Database>: Send + Sync {
    async fn list(
        &self,
        filter: &ApprovalFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalModel>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Append-only history of approval mutations
#[async_trait]
pub trait ApprovalHistoryRepository<DB: Database>: Send + Sync {
    async fn append_history(
        &self,
        entry: ApprovalHistoryModel,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// History of one approval, oldest first
    async fn load_history(
        &self,
        approval_id: Uuid,
    ) -> Result<Vec<ApprovalHistoryModel>, Box<dyn std::error::Error + Send + Sync>>;
}
