use postgres_unit_of_work::Executor;
use sqlx::PgPool;
use std::error::Error;
use std::sync::Arc;

use crate::repository::activity::ActivityLogRepositoryImpl;
use crate::repository::approval::ApprovalRepositoryImpl;
use crate::repository::asset::CleanupJobRepositoryImpl;
use crate::repository::entity::{
    DocumentRepositoryImpl, EventRepositoryImpl, FinanceRepositoryImpl, LetterRepositoryImpl,
    ManagementRepositoryImpl, WorkProgramRepositoryImpl,
};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Begins a transaction and builds every repository on top of it
    ///
    /// Nothing is persisted until [`PostgresSession::commit`] is called;
    /// dropping the session rolls the transaction back.
    pub async fn begin_session(&self) -> Result<PostgresSession, sqlx::Error> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);

        let approval_repos = ApprovalRepositories {
            approval_repository: Arc::new(ApprovalRepositoryImpl::new(executor.clone())),
        };

        let entity_repos = EntityRepositories {
            work_program_repository: Arc::new(WorkProgramRepositoryImpl::new(executor.clone())),
            event_repository: Arc::new(EventRepositoryImpl::new(executor.clone())),
            finance_repository: Arc::new(FinanceRepositoryImpl::new(executor.clone())),
            document_repository: Arc::new(DocumentRepositoryImpl::new(executor.clone())),
            letter_repository: Arc::new(LetterRepositoryImpl::new(executor.clone())),
            management_repository: Arc::new(ManagementRepositoryImpl::new(executor.clone())),
        };

        let activity_repos = ActivityRepositories {
            activity_log_repository: Arc::new(ActivityLogRepositoryImpl::new(executor.clone())),
            cleanup_job_repository: Arc::new(CleanupJobRepositoryImpl::new(executor.clone())),
        };

        Ok(PostgresSession {
            executor,
            approval_repos,
            entity_repos,
            activity_repos,
        })
    }
}

/// Repositories sharing one transaction
pub struct PostgresSession {
    executor: Executor,
    pub approval_repos: ApprovalRepositories,
    pub entity_repos: EntityRepositories,
    pub activity_repos: ActivityRepositories,
}

impl PostgresSession {
    pub fn approval_repos(&self) -> &ApprovalRepositories {
        &self.approval_repos
    }

    pub fn entity_repos(&self) -> &EntityRepositories {
        &self.entity_repos
    }

    pub fn activity_repos(&self) -> &ActivityRepositories {
        &self.activity_repos
    }

    /// Commits the shared transaction. Repositories of this session fail
    /// with "Transaction has been consumed" afterwards.
    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self
            .executor
            .tx
            .lock()
            .await
            .take()
            .ok_or("Transaction has been consumed")?;
        tx.commit().await?;
        Ok(())
    }
}

pub struct ApprovalRepositories {
    pub approval_repository: Arc<ApprovalRepositoryImpl>,
}

pub struct EntityRepositories {
    pub work_program_repository: Arc<WorkProgramRepositoryImpl>,
    pub event_repository: Arc<EventRepositoryImpl>,
    pub finance_repository: Arc<FinanceRepositoryImpl>,
    pub document_repository: Arc<DocumentRepositoryImpl>,
    pub letter_repository: Arc<LetterRepositoryImpl>,
    pub management_repository: Arc<ManagementRepositoryImpl>,
}

pub struct ActivityRepositories {
    pub activity_log_repository: Arc<ActivityLogRepositoryImpl>,
    pub cleanup_job_repository: Arc<CleanupJobRepositoryImpl>,
}
