use backoffice_core_api::domain::{ActivityType, AuditEntityType};
use backoffice_core_db::models::activity::ActivityLogModel;
use chrono::{SubsecRound, Utc};
use serde_json::json;
use uuid::Uuid;

pub fn create_test_activity_log(entity_type: AuditEntityType, entity_id: Uuid) -> ActivityLogModel {
    ActivityLogModel {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        activity_type: ActivityType::Update,
        entity_type,
        entity_id,
        description: "Updated approval status".to_string(),
        metadata: json!({
            "old_data": { "status": "PENDING" },
            "new_data": { "status": "APPROVED" }
        }),
        created_at: Utc::now().trunc_subsecs(6),
    }
}
