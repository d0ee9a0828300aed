use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::approval::{
    Approval, ApprovalPage, ApprovalView, CreateApprovalRequest, ListApprovalsRequest,
    UpdateApprovalRequest,
};
use crate::error::ApiResult;

#[async_trait]
pub trait ApprovalService: Send + Sync {
    /// Open a new PENDING approval for an entity
    async fn create_approval(&self, request: CreateApprovalRequest) -> ApiResult<Approval>;

    /// Record a reviewer decision and push it onto the entity's status
    async fn update_approval(
        &self,
        id: Uuid,
        request: UpdateApprovalRequest,
        actor_id: Uuid,
    ) -> ApiResult<Approval>;

    async fn delete_approval(&self, id: Uuid, actor_id: Uuid) -> ApiResult<()>;

    async fn find_approval(&self, id: Uuid) -> ApiResult<Option<ApprovalView>>;

    async fn list_approvals(&self, request: ListApprovalsRequest) -> ApiResult<ApprovalPage>;
}
