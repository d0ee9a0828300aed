//! Repository bundle handed to the services.
//!
//! Services only see the composite store traits, so a PostgreSQL session
//! and the in-memory doubles used by the tests are interchangeable.

use backoffice_core_api::domain::{EntityKind, EntitySummary};
use backoffice_core_db::models::entity::{
    DocumentModel, EventModel, FinanceModel, LetterModel, WorkProgramModel,
};
use backoffice_core_db::models::reviewable::{AssetOwner, Reviewable};
use backoffice_core_db::repository::{
    load_one, ActivityLogStore, ApprovalStore, EntityStore, ExistByIds, ManagementStore,
};
use backoffice_core_postgres::PostgresSession;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

pub type Db = sqlx::Postgres;

pub type RepoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Clone)]
pub struct ServiceRepositories {
    pub approvals: Arc<dyn ApprovalStore<Db>>,
    pub work_programs: Arc<dyn EntityStore<Db, WorkProgramModel>>,
    pub events: Arc<dyn EntityStore<Db, EventModel>>,
    pub finances: Arc<dyn EntityStore<Db, FinanceModel>>,
    pub documents: Arc<dyn EntityStore<Db, DocumentModel>>,
    pub letters: Arc<dyn EntityStore<Db, LetterModel>>,
    pub managements: Arc<dyn ManagementStore<Db>>,
    pub activity_log: Arc<dyn ActivityLogStore<Db>>,
}

impl ServiceRepositories {
    pub fn from_session(session: &PostgresSession) -> Self {
        let entities = session.entity_repos();
        Self {
            approvals: session.approval_repos().approval_repository.clone(),
            work_programs: entities.work_program_repository.clone(),
            events: entities.event_repository.clone(),
            finances: entities.finance_repository.clone(),
            documents: entities.document_repository.clone(),
            letters: entities.letter_repository.clone(),
            managements: entities.management_repository.clone(),
            activity_log: session.activity_repos().activity_log_repository.clone(),
        }
    }

    /// Read-only projection of the entity behind an approval
    pub async fn summary(&self, kind: EntityKind, id: Uuid) -> RepoResult<Option<EntitySummary>> {
        match kind {
            EntityKind::WorkProgram => summary_of(self.work_programs.as_ref(), id).await,
            EntityKind::Event => summary_of(self.events.as_ref(), id).await,
            EntityKind::Finance => summary_of(self.finances.as_ref(), id).await,
            EntityKind::Document => summary_of(self.documents.as_ref(), id).await,
            EntityKind::Letter => summary_of(self.letters.as_ref(), id).await,
        }
    }

    pub async fn exists(&self, kind: EntityKind, id: Uuid) -> RepoResult<bool> {
        let found = match kind {
            EntityKind::WorkProgram => self.work_programs.exist_by_ids(&[id]).await?,
            EntityKind::Event => self.events.exist_by_ids(&[id]).await?,
            EntityKind::Finance => self.finances.exist_by_ids(&[id]).await?,
            EntityKind::Document => self.documents.exist_by_ids(&[id]).await?,
            EntityKind::Letter => self.letters.exist_by_ids(&[id]).await?,
        };
        Ok(found.first().map(|(_, exists)| *exists).unwrap_or(false))
    }
}

async fn summary_of<T>(store: &dyn EntityStore<Db, T>, id: Uuid) -> RepoResult<Option<EntitySummary>>
where
    T: Reviewable + AssetOwner,
{
    Ok(load_one::<Db, T, _>(store, id).await?.map(|entity| entity.summary()))
}
