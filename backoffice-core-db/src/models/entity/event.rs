use backoffice_core_api::domain::{AssetClass, EntityKind, PublicationStatus};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{to_asset_ref, AssetOwner, AssetRef, Reviewable};

/// # Documentation
/// Database model for an organization event, published once approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventModel {
    pub id: Uuid,
    pub name: HeaplessString<255>,
    pub description: Option<String>,
    pub category: HeaplessString<100>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<HeaplessString<255>>,
    pub work_program_id: Option<Uuid>,
    /// External object id (or legacy URL) of the cover image
    pub thumbnail: Option<AssetRef>,
    pub status: PublicationStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(PartialEq)]
struct EventSubstance<'a> {
    name: &'a str,
    description: Option<&'a str>,
    category: &'a str,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    location: Option<&'a str>,
    work_program_id: Option<Uuid>,
}

impl EventModel {
    fn substance(&self) -> EventSubstance<'_> {
        EventSubstance {
            name: &self.name,
            description: self.description.as_deref(),
            category: &self.category,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            location: self.location.as_deref(),
            work_program_id: self.work_program_id,
        }
    }
}

impl Identifiable for EventModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Reviewable for EventModel {
    const KIND: EntityKind = EntityKind::Event;

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> PublicationStatus {
        self.status
    }

    fn set_status(&mut self, status: PublicationStatus) {
        self.status = status;
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn differs_substantively(&self, other: &Self) -> bool {
        self.substance() != other.substance()
    }
}

impl AssetOwner for EventModel {
    const ASSET_CLASSES: &'static [AssetClass] = &[AssetClass::EventThumbnail];

    fn asset_ref(&self, class: AssetClass) -> Option<&str> {
        match class {
            AssetClass::EventThumbnail => self.thumbnail.as_deref(),
            _ => None,
        }
    }

    fn set_asset_ref(&mut self, class: AssetClass, reference: Option<&str>) -> Result<(), String> {
        match class {
            AssetClass::EventThumbnail => {
                self.thumbnail = to_asset_ref(reference)?;
                Ok(())
            }
            other => Err(format!("Event has no {} field", other.field_name())),
        }
    }
}
