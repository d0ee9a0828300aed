use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::entity_kind::AuditEntityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "activity_type", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ActivityType {
    Create,
    Update,
    Delete,
    Submit,
    Review,
}

/// Before/after snapshot attached to an activity entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user_id: Uuid,
    pub activity_type: ActivityType,
    pub entity_type: AuditEntityType,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: ActivityMetadata,
}
