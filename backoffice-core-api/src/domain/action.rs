use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::status::ApprovalStatus;
use crate::error::BulkItemFailure;

/// Reviewer action applied to a selection of approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Approve,
    Reject,
    Revision,
    Return,
}

impl ApprovalAction {
    pub fn target_status(&self) -> ApprovalStatus {
        match self {
            ApprovalAction::Approve => ApprovalStatus::Approved,
            ApprovalAction::Reject => ApprovalStatus::Rejected,
            ApprovalAction::Revision => ApprovalStatus::Cancelled,
            ApprovalAction::Return => ApprovalStatus::Pending,
        }
    }

    pub fn default_note(&self) -> &'static str {
        match self {
            ApprovalAction::Approve => "Approved via bulk action",
            ApprovalAction::Reject => "Rejected via bulk action",
            ApprovalAction::Revision => "Revision requested via bulk action",
            ApprovalAction::Return => "Returned for review via bulk action",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkActionRequest {
    #[validate(length(min = 1))]
    pub approval_ids: Vec<Uuid>,
    pub action: ApprovalAction,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Per-item result of a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<BulkItemFailure>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
