use backoffice_core_api::domain::AssetClass;
use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{to_asset_ref, AssetOwner, AssetRef};

/// # Documentation
/// Database model for a management period.
///
/// Not reviewable. Carries two externally hosted files: the appointment
/// decree and the organization structure diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementModel {
    pub id: Uuid,
    pub name: HeaplessString<255>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub decree: Option<AssetRef>,
    pub structure: Option<AssetRef>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for ManagementModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl AssetOwner for ManagementModel {
    const ASSET_CLASSES: &'static [AssetClass] =
        &[AssetClass::ManagementDecree, AssetClass::ManagementStructure];

    fn asset_ref(&self, class: AssetClass) -> Option<&str> {
        match class {
            AssetClass::ManagementDecree => self.decree.as_deref(),
            AssetClass::ManagementStructure => self.structure.as_deref(),
            _ => None,
        }
    }

    fn set_asset_ref(&mut self, class: AssetClass, reference: Option<&str>) -> Result<(), String> {
        match class {
            AssetClass::ManagementDecree => self.decree = to_asset_ref(reference)?,
            AssetClass::ManagementStructure => self.structure = to_asset_ref(reference)?,
            other => return Err(format!("Management has no {} field", other.field_name())),
        }
        Ok(())
    }
}
