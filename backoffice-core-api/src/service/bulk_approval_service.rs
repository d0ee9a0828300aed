use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::action::{BulkActionRequest, BulkOutcome};
use crate::error::ApiResult;

#[async_trait]
pub trait BulkApprovalService: Send + Sync {
    /// Apply one action to every selected approval.
    ///
    /// Returns `Ok` only when every item succeeded; otherwise
    /// `ApiError::PartialBulkFailure`. Successful items stay persisted either way.
    async fn apply_bulk(&self, request: BulkActionRequest, actor_id: Uuid) -> ApiResult<BulkOutcome>;
}
