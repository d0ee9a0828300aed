use backoffice_core_api::domain::AssetClass;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Journal entry for a scheduled deletion of a replaced external object.
///
/// Written before the deletion is queued and removed once it succeeds, so
/// that pending deletions can be picked up again after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCleanupJobModel {
    pub id: Uuid,
    pub object_id: String,
    pub asset_class: AssetClass,
    /// Earliest time the deletion may run
    pub not_before: DateTime<Utc>,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssetCleanupJobModel {
    pub fn new(object_id: &str, asset_class: AssetClass, not_before: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            object_id: object_id.to_string(),
            asset_class,
            not_before,
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for AssetCleanupJobModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
