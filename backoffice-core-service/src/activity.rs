use async_trait::async_trait;
use backoffice_core_api::domain::{
    ActivityEntry, ActivityMetadata, ActivityType, AuditEntityType,
};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::ActivityLogger;
use backoffice_core_db::models::activity::ActivityLogModel;
use backoffice_core_db::repository::{ActivityLogStore, Page, PageRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::repositories::Db;

/// Activity logger writing to the `activity_log` table
pub struct RepositoryActivityLogger {
    store: Arc<dyn ActivityLogStore<Db>>,
}

impl RepositoryActivityLogger {
    pub fn new(store: Arc<dyn ActivityLogStore<Db>>) -> Self {
        Self { store }
    }

    /// Entries recorded against one entity, newest first
    pub async fn activity_for(
        &self,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<ActivityLogModel>> {
        Ok(self.store.find_by_entity(entity_type, entity_id, page).await?)
    }
}

#[async_trait]
impl ActivityLogger for RepositoryActivityLogger {
    async fn log_activity(&self, entry: ActivityEntry) -> ApiResult<()> {
        let model = ActivityLogModel::try_from(entry).map_err(ApiError::InternalError)?;
        self.store.create_batch(vec![model]).await?;
        Ok(())
    }
}

/// Writes an activity entry; a failure is logged and swallowed.
pub async fn record_activity(logger: &dyn ActivityLogger, entry: ActivityEntry) {
    let entity_id = entry.entity_id;
    let activity_type = entry.activity_type;
    if let Err(e) = logger.log_activity(entry).await {
        warn!(
            entity_id = %entity_id,
            activity_type = ?activity_type,
            error = %e,
            "failed to record activity"
        );
    }
}

/// Shorthand for building an entry with optional before/after snapshots
pub fn activity_entry(
    user_id: Uuid,
    activity_type: ActivityType,
    entity_type: AuditEntityType,
    entity_id: Uuid,
    description: impl Into<String>,
    old_data: Option<Value>,
    new_data: Option<Value>,
) -> ActivityEntry {
    ActivityEntry {
        user_id,
        activity_type,
        entity_type,
        entity_id,
        description: description.into(),
        metadata: ActivityMetadata { old_data, new_data },
    }
}

/// JSON snapshot for activity metadata; `None` if serialization fails
pub fn snapshot<T: serde::Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}
