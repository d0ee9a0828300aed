use async_trait::async_trait;
use backoffice_core_api::domain::{BulkActionRequest, BulkOutcome, UpdateApprovalRequest};
use backoffice_core_api::error::{ApiError, ApiResult, BulkItemFailure};
use backoffice_core_api::service::{ApprovalService, BulkApprovalService};
use backoffice_core_postgres::{PostgresRepositories, PostgresSession};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::activity::RepositoryActivityLogger;
use crate::approval_service::ApprovalServiceImpl;
use crate::config::ApprovalPolicy;
use crate::repositories::ServiceRepositories;

/// Approval writes of one bulk item, committed or dropped as a whole
#[async_trait]
pub trait ApprovalUnitOfWork: Send + Sync {
    fn approvals(&self) -> &dyn ApprovalService;

    async fn commit(self: Box<Self>) -> ApiResult<()>;
}

/// Opens a fresh unit of work per bulk item
#[async_trait]
pub trait ApprovalUnits: Send + Sync {
    async fn begin(&self) -> ApiResult<Box<dyn ApprovalUnitOfWork>>;
}

/// One PostgreSQL transaction per bulk item
pub struct PostgresApprovalUnits {
    repositories: Arc<PostgresRepositories>,
    policy: ApprovalPolicy,
}

impl PostgresApprovalUnits {
    pub fn new(repositories: Arc<PostgresRepositories>, policy: ApprovalPolicy) -> Self {
        Self { repositories, policy }
    }
}

struct PostgresApprovalUnit {
    session: PostgresSession,
    approvals: ApprovalServiceImpl,
}

#[async_trait]
impl ApprovalUnitOfWork for PostgresApprovalUnit {
    fn approvals(&self) -> &dyn ApprovalService {
        &self.approvals
    }

    async fn commit(self: Box<Self>) -> ApiResult<()> {
        Ok(self.session.commit().await?)
    }
}

#[async_trait]
impl ApprovalUnits for PostgresApprovalUnits {
    async fn begin(&self) -> ApiResult<Box<dyn ApprovalUnitOfWork>> {
        let session = self
            .repositories
            .begin_session()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let repos = ServiceRepositories::from_session(&session);
        let activity = Arc::new(RepositoryActivityLogger::new(repos.activity_log.clone()));
        let approvals = ApprovalServiceImpl::new(repos, activity, self.policy);
        Ok(Box::new(PostgresApprovalUnit { session, approvals }))
    }
}

/// Applies one reviewer action to many approvals, one at a time.
///
/// Not atomic: each item runs and commits in its own unit of work, so items
/// that succeed stay persisted when others fail, and a failed item does not
/// poison the ones after it.
pub struct BulkApprovalCoordinator {
    units: Arc<dyn ApprovalUnits>,
}

impl BulkApprovalCoordinator {
    pub fn new(units: Arc<dyn ApprovalUnits>) -> Self {
        Self { units }
    }

    async fn apply_one(&self, approval_id: Uuid, update: UpdateApprovalRequest, actor_id: Uuid) -> ApiResult<()> {
        let unit = self.units.begin().await?;
        // Dropping the unit on failure rolls the item back
        unit.approvals().update_approval(approval_id, update, actor_id).await?;
        unit.commit().await
    }
}

#[async_trait]
impl BulkApprovalService for BulkApprovalCoordinator {
    async fn apply_bulk(&self, request: BulkActionRequest, actor_id: Uuid) -> ApiResult<BulkOutcome> {
        request.validate()?;

        let status = request.action.target_status();
        let note = request
            .note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| request.action.default_note().to_string());

        let mut outcome = BulkOutcome::default();
        for approval_id in request.approval_ids {
            let update = UpdateApprovalRequest {
                status,
                note: Some(note.clone()),
            };
            match self.apply_one(approval_id, update, actor_id).await {
                Ok(()) => outcome.succeeded.push(approval_id),
                Err(e) => {
                    warn!(approval_id = %approval_id, error = %e, "bulk item failed");
                    outcome.failed.push(BulkItemFailure {
                        approval_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            action = ?request.action,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "bulk approval action applied"
        );

        if outcome.is_success() {
            Ok(outcome)
        } else {
            Err(ApiError::PartialBulkFailure {
                failed: outcome.failed.len(),
                total: outcome.total(),
                failures: outcome.failed,
            })
        }
    }
}
