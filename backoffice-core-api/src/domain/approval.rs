use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::entity_kind::{ApprovalEntityType, EntityKind};
use super::status::{ApprovalStatus, PublicationStatus};

/// An approval as seen by callers of the approval service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub id: Uuid,
    pub entity_type: ApprovalEntityType,
    pub entity_id: Uuid,
    pub user_id: Uuid,
    pub status: ApprovalStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only projection of the entity an approval points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub kind: EntityKind,
    pub id: Uuid,
    pub title: String,
    pub status: PublicationStatus,
}

/// Approval joined with its entity projection for display.
///
/// `entity` is `None` when the referenced record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalView {
    pub approval: Approval,
    pub entity: Option<EntitySummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalFilter {
    pub status: Option<ApprovalStatus>,
    pub entity_type: Option<ApprovalEntityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalPage {
    pub items: Vec<ApprovalView>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApprovalRequest {
    pub entity_type: ApprovalEntityType,
    pub entity_id: Uuid,
    pub submitter_id: Uuid,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApprovalRequest {
    pub status: ApprovalStatus,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListApprovalsRequest {
    #[serde(default)]
    pub filter: ApprovalFilter,
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: usize,
    #[validate(range(min = 1, max = 200))]
    pub limit: usize,
}

impl Default for ListApprovalsRequest {
    fn default() -> Self {
        Self {
            filter: ApprovalFilter::default(),
            page: 1,
            limit: 20,
        }
    }
}
