use backoffice_core_api::error::ApiResult;
use backoffice_core_api::service::ObjectStore;
use backoffice_core_db::models::entity::{
    DocumentModel, EventModel, FinanceModel, LetterModel, WorkProgramModel,
};
use backoffice_core_postgres::PostgresSession;
use std::sync::Arc;
use tracing::warn;

use crate::activity::RepositoryActivityLogger;
use crate::approval_service::ApprovalServiceImpl;
use crate::asset::{AssetReconciler, CleanupQueue};
use crate::config::ServiceConfig;
use crate::entity_service::ReviewableEntityService;
use crate::management_service::ManagementService;
use crate::repositories::ServiceRepositories;

/// Every service wired over one set of repositories.
///
/// With PostgreSQL the repositories come from a session, so build one
/// instance per unit of work and end it with [`Self::commit`] or
/// [`Self::rollback`]. Objects replaced or removed by the saves are only
/// released once the session has committed. The object store and the
/// cleanup queue are shared across instances.
///
/// Bulk reviewer actions commit item by item and have their own entry
/// point, [`crate::bulk::BulkApprovalCoordinator`].
///
/// # Example
///
/// ```rust,ignore
/// let session = postgres.begin_session().await?;
/// let services = BackofficeServices::new(
///     ServiceRepositories::from_session(&session),
///     &config,
///     object_store.clone(),
///     cleanup.clone(),
/// );
/// match services.finances.update(id, edit, editor_id).await {
///     Ok(updated) => {
///         services.commit(session).await?;
///         Ok(updated)
///     }
///     Err(e) => {
///         services.rollback(session).await;
///         Err(e)
///     }
/// }
/// ```
pub struct BackofficeServices {
    pub activity: Arc<RepositoryActivityLogger>,
    pub approvals: Arc<ApprovalServiceImpl>,
    pub work_programs: ReviewableEntityService<WorkProgramModel>,
    pub events: ReviewableEntityService<EventModel>,
    pub finances: ReviewableEntityService<FinanceModel>,
    pub documents: ReviewableEntityService<DocumentModel>,
    pub letters: ReviewableEntityService<LetterModel>,
    pub managements: ManagementService,
    assets: Arc<AssetReconciler>,
}

impl BackofficeServices {
    pub fn new(
        repos: ServiceRepositories,
        config: &ServiceConfig,
        object_store: Arc<dyn ObjectStore>,
        cleanup: Arc<CleanupQueue>,
    ) -> Self {
        let activity = Arc::new(RepositoryActivityLogger::new(repos.activity_log.clone()));
        let approvals = Arc::new(ApprovalServiceImpl::new(
            repos.clone(),
            activity.clone(),
            config.approval,
        ));
        let assets = Arc::new(AssetReconciler::new(
            object_store,
            config.asset_folders.clone(),
            cleanup,
        ));
        let deletion = config.deletion;

        Self {
            work_programs: ReviewableEntityService::new(
                repos.work_programs.clone(),
                approvals.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            events: ReviewableEntityService::new(
                repos.events.clone(),
                approvals.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            finances: ReviewableEntityService::new(
                repos.finances.clone(),
                approvals.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            documents: ReviewableEntityService::new(
                repos.documents.clone(),
                approvals.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            letters: ReviewableEntityService::new(
                repos.letters.clone(),
                approvals.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            managements: ManagementService::new(
                repos.managements.clone(),
                assets.clone(),
                activity.clone(),
                deletion,
            ),
            approvals,
            activity,
            assets,
        }
    }

    /// Commits the session, then releases the objects it superseded.
    ///
    /// If the commit itself fails its outcome is unknown, so every object
    /// is left in place.
    pub async fn commit(&self, session: PostgresSession) -> ApiResult<()> {
        if let Err(e) = session.commit().await {
            warn!(error = %e, "session commit failed");
            self.assets.forget_staged().await;
            return Err(e.into());
        }
        self.after_commit().await;
        Ok(())
    }

    /// Drops the session without committing and deletes the objects
    /// uploaded during it.
    pub async fn rollback(&self, session: PostgresSession) {
        drop(session);
        self.after_rollback().await;
    }

    /// Runs the staged asset work of a unit of work that has committed
    pub async fn after_commit(&self) {
        self.assets.finish_committed().await;
    }

    /// Runs the staged asset work of a unit of work that was rolled back
    pub async fn after_rollback(&self) {
        self.assets.finish_rolled_back().await;
    }
}
