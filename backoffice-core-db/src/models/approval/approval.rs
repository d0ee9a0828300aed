use backoffice_core_api::domain::{Approval, ApprovalEntityType, ApprovalStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Database model for one review request against one entity.
///
/// Several rows may exist for the same entity; readers pick the latest by
/// `created_at`. No uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalModel {
    pub id: Uuid,

    pub entity_type: ApprovalEntityType,

    pub entity_id: Uuid,

    /// Submitter of the review request
    pub user_id: Uuid,

    pub status: ApprovalStatus,

    /// Free text, last writer wins
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ApprovalModel {
    pub fn new_pending(
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        user_id: Uuid,
        note: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            user_id,
            status: ApprovalStatus::Pending,
            note,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for ApprovalModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl From<ApprovalModel> for Approval {
    fn from(model: ApprovalModel) -> Self {
        Approval {
            id: model.id,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            user_id: model.user_id,
            status: model.status,
            note: model.note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Picks the authoritative row out of an entity's approvals: latest
/// `created_at`, then latest `updated_at`, then highest id.
pub fn latest_approval<'a, I>(approvals: I) -> Option<&'a ApprovalModel>
where
    I: IntoIterator<Item = &'a ApprovalModel>,
{
    approvals
        .into_iter()
        .max_by_key(|a| (a.created_at, a.updated_at, a.id))
}
