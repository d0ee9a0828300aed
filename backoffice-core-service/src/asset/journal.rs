use async_trait::async_trait;
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_db::models::asset::AssetCleanupJobModel;
use backoffice_core_db::repository::{CreateBatch, DeleteBatch, FindPendingCleanupJobs, UpdateBatch};
use backoffice_core_postgres::PostgresRepositories;
use std::sync::Arc;
use uuid::Uuid;

/// Durable record of deferred deletions.
///
/// A job is recorded before it is queued and completed once the object is
/// gone (or given up on), so whatever is still pending after a crash is
/// picked up again by [`super::cleanup::CleanupQueue::recover`].
#[async_trait]
pub trait CleanupJournal: Send + Sync {
    async fn record(&self, job: AssetCleanupJobModel) -> ApiResult<()>;

    /// Persists `attempts`, `last_error` and `not_before` of a retried job
    async fn reschedule(&self, job: &AssetCleanupJobModel) -> ApiResult<()>;

    async fn complete(&self, job_id: Uuid) -> ApiResult<()>;

    async fn pending(&self, limit: usize) -> ApiResult<Vec<AssetCleanupJobModel>>;
}

/// Journal backed by the `asset_cleanup_job` table.
///
/// The queue outlives any request transaction, so every call runs in a
/// session of its own and commits immediately.
pub struct PostgresCleanupJournal {
    repos: Arc<PostgresRepositories>,
}

impl PostgresCleanupJournal {
    pub fn new(repos: Arc<PostgresRepositories>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl CleanupJournal for PostgresCleanupJournal {
    async fn record(&self, job: AssetCleanupJobModel) -> ApiResult<()> {
        let session = self.repos.begin_session().await.map_err(db_error)?;
        session
            .activity_repos()
            .cleanup_job_repository
            .create_batch(vec![job])
            .await?;
        session.commit().await?;
        Ok(())
    }

    async fn reschedule(&self, job: &AssetCleanupJobModel) -> ApiResult<()> {
        let session = self.repos.begin_session().await.map_err(db_error)?;
        session
            .activity_repos()
            .cleanup_job_repository
            .update_batch(vec![job.clone()])
            .await?;
        session.commit().await?;
        Ok(())
    }

    async fn complete(&self, job_id: Uuid) -> ApiResult<()> {
        let session = self.repos.begin_session().await.map_err(db_error)?;
        session
            .activity_repos()
            .cleanup_job_repository
            .delete_batch(&[job_id])
            .await?;
        session.commit().await?;
        Ok(())
    }

    async fn pending(&self, limit: usize) -> ApiResult<Vec<AssetCleanupJobModel>> {
        let session = self.repos.begin_session().await.map_err(db_error)?;
        let jobs = session
            .activity_repos()
            .cleanup_job_repository
            .find_pending(limit)
            .await?;
        session.commit().await?;
        Ok(jobs)
    }
}

fn db_error(err: sqlx::Error) -> ApiError {
    ApiError::DatabaseError(err.to_string())
}
