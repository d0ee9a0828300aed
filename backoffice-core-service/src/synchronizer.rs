//! Pushes reviewer decisions onto the reviewed record's own status.

use backoffice_core_api::domain::{ApprovalEntityType, ApprovalStatus, EntityKind, PublicationStatus};
use backoffice_core_api::error::ApiResult;
use backoffice_core_db::models::reviewable::{AssetOwner, Reviewable};
use backoffice_core_db::repository::{load_one, EntityStore};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CancelledTransition;
use crate::repositories::{Db, ServiceRepositories};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The decision carries no status change for the entity
    NotSynchronized,
    /// The referenced record does not exist (any more)
    MissingEntity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied {
        kind: EntityKind,
        entity_id: Uuid,
        status: PublicationStatus,
    },
    /// The entity already had the target status
    Unchanged,
    Skipped(SkipReason),
}

pub struct EntityStatusSynchronizer {
    repos: ServiceRepositories,
    cancelled_transition: CancelledTransition,
}

impl EntityStatusSynchronizer {
    pub fn new(repos: ServiceRepositories, cancelled_transition: CancelledTransition) -> Self {
        Self {
            repos,
            cancelled_transition,
        }
    }

    /// Entity status implied by an approval decision, if any
    pub fn target_status(&self, decision: ApprovalStatus) -> Option<PublicationStatus> {
        match decision {
            ApprovalStatus::Approved => Some(PublicationStatus::Publish),
            ApprovalStatus::Rejected => Some(PublicationStatus::Draft),
            ApprovalStatus::Cancelled => match self.cancelled_transition {
                CancelledTransition::Untouched => None,
                CancelledTransition::Draft => Some(PublicationStatus::Draft),
                CancelledTransition::Pending => Some(PublicationStatus::Pending),
            },
            ApprovalStatus::Pending => None,
        }
    }

    /// Apply `decision` to the entity. Write errors propagate.
    pub async fn apply(
        &self,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        decision: ApprovalStatus,
    ) -> ApiResult<SyncOutcome> {
        let Some(target) = self.target_status(decision) else {
            debug!(%entity_type, %entity_id, %decision, "decision not synchronized");
            return Ok(SyncOutcome::Skipped(SkipReason::NotSynchronized));
        };

        match entity_type.kind() {
            EntityKind::WorkProgram => sync_status(self.repos.work_programs.as_ref(), entity_id, target).await,
            EntityKind::Event => sync_status(self.repos.events.as_ref(), entity_id, target).await,
            EntityKind::Finance => sync_status(self.repos.finances.as_ref(), entity_id, target).await,
            EntityKind::Document => sync_status(self.repos.documents.as_ref(), entity_id, target).await,
            EntityKind::Letter => sync_status(self.repos.letters.as_ref(), entity_id, target).await,
        }
    }
}

async fn sync_status<T>(
    store: &dyn EntityStore<Db, T>,
    entity_id: Uuid,
    target: PublicationStatus,
) -> ApiResult<SyncOutcome>
where
    T: Reviewable + AssetOwner,
{
    let Some(mut entity) = load_one::<Db, T, _>(store, entity_id).await? else {
        warn!(kind = %T::KIND, %entity_id, "approval references a missing entity; status not synchronized");
        return Ok(SyncOutcome::Skipped(SkipReason::MissingEntity));
    };

    if entity.status() == target {
        return Ok(SyncOutcome::Unchanged);
    }

    entity.set_status(target);
    entity.touch(Utc::now());
    store.update_batch(vec![entity]).await?;

    info!(kind = %T::KIND, %entity_id, status = ?target, "entity status synchronized");
    Ok(SyncOutcome::Applied {
        kind: T::KIND,
        entity_id,
        status: target,
    })
}
