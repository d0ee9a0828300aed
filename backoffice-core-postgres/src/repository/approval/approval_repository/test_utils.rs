use backoffice_core_api::domain::ApprovalEntityType;
use backoffice_core_db::models::approval::ApprovalModel;
use uuid::Uuid;

pub fn create_test_approval(entity_type: ApprovalEntityType, entity_id: Uuid) -> ApprovalModel {
    ApprovalModel::new_pending(
        entity_type,
        entity_id,
        Uuid::new_v4(),
        Some("Please review".to_string()),
    )
}
