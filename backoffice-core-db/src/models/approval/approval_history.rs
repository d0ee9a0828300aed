use backoffice_core_api::domain::{ApprovalEntityType, ApprovalStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::approval::ApprovalModel;
use crate::models::identifiable::Identifiable;

/// # Documentation
/// Immutable record of one approval mutation. Rows are only ever appended,
/// and they outlive the approval they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalHistoryModel {
    pub id: Uuid,
    pub approval_id: Uuid,
    pub entity_type: ApprovalEntityType,
    pub entity_id: Uuid,
    pub status: ApprovalStatus,
    pub note: Option<String>,
    /// User whose action produced this state
    pub actor_id: Uuid,
    pub recorded_at: DateTime<Utc>,
}

impl ApprovalHistoryModel {
    pub fn record(approval: &ApprovalModel, actor_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            approval_id: approval.id,
            entity_type: approval.entity_type,
            entity_id: approval.entity_id,
            status: approval.status,
            note: approval.note.clone(),
            actor_id,
            recorded_at: Utc::now(),
        }
    }
}

impl Identifiable for ApprovalHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
