use backoffice_core_api::domain::{
    ApprovalEntityType, AssetClass, EntityKind, EntitySummary, PublicationStatus,
};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::Serialize;
use uuid::Uuid;

use super::identifiable::Identifiable;

/// Maximum length of a stored external file reference
pub const ASSET_REF_LEN: usize = 255;

pub type AssetRef = HeaplessString<ASSET_REF_LEN>;

/// A record kind gated by the approval workflow.
pub trait Reviewable: Identifiable + Clone + Serialize + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Human readable name, used for display and for naming uploaded files
    fn title(&self) -> &str;

    fn status(&self) -> PublicationStatus;

    fn set_status(&mut self, status: PublicationStatus);

    /// User that owns (created) the record
    fn owner_id(&self) -> Uuid;

    fn touch(&mut self, at: DateTime<Utc>);

    /// Compares the substantive fields only.
    ///
    /// Status, timestamps, owner and asset references are excluded, so two
    /// records that do not differ here differ in nothing a reviewer judged.
    fn differs_substantively(&self, other: &Self) -> bool;

    /// Tag used for approvals opened against this record
    fn approval_entity_type(&self) -> ApprovalEntityType {
        Self::KIND.approval_entity_types()[0]
    }

    fn summary(&self) -> EntitySummary {
        EntitySummary {
            kind: Self::KIND,
            id: self.get_id(),
            title: self.title().to_string(),
            status: self.status(),
        }
    }
}

/// A record holding references to externally hosted files.
pub trait AssetOwner {
    const ASSET_CLASSES: &'static [AssetClass] = &[];

    fn asset_ref(&self, _class: AssetClass) -> Option<&str> {
        None
    }

    fn set_asset_ref(&mut self, class: AssetClass, _reference: Option<&str>) -> Result<(), String> {
        Err(format!("{} has no {} field", std::any::type_name::<Self>(), class.field_name()))
    }
}

/// Converts an optional reference into its bounded storage form
pub fn to_asset_ref(reference: Option<&str>) -> Result<Option<AssetRef>, String> {
    reference
        .map(|value| {
            HeaplessString::try_from(value).map_err(|_| {
                format!("File reference is too long (max {ASSET_REF_LEN} chars)")
            })
        })
        .transpose()
}
