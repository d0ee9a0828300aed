use backoffice_core_api::domain::{ActivityEntry, ActivityType, AuditEntityType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Audit trail entry written after approval and entity mutations.
///
/// `metadata` holds `{ "old_data": .., "new_data": .. }` snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: ActivityType,
    pub entity_type: AuditEntityType,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for ActivityLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TryFrom<ActivityEntry> for ActivityLogModel {
    type Error = String;

    fn try_from(entry: ActivityEntry) -> Result<Self, Self::Error> {
        let metadata = serde_json::to_value(&entry.metadata)
            .map_err(|e| format!("Failed to serialize activity metadata: {e}"))?;
        Ok(ActivityLogModel {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            activity_type: entry.activity_type,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            description: entry.description,
            metadata,
            created_at: Utc::now(),
        })
    }
}
