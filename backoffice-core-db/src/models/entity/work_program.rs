use backoffice_core_api::domain::{EntityKind, PublicationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{AssetOwner, Reviewable};

/// # Documentation
/// Database model for a planned work program of a division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkProgramModel {
    pub id: Uuid,
    pub name: HeaplessString<255>,
    pub description: Option<String>,
    /// Person responsible for carrying the program out
    pub person_in_charge: Option<HeaplessString<100>>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: Decimal,
    pub status: PublicationStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(PartialEq)]
struct WorkProgramSubstance<'a> {
    name: &'a str,
    description: Option<&'a str>,
    person_in_charge: Option<&'a str>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: Decimal,
}

impl WorkProgramModel {
    fn substance(&self) -> WorkProgramSubstance<'_> {
        WorkProgramSubstance {
            name: &self.name,
            description: self.description.as_deref(),
            person_in_charge: self.person_in_charge.as_deref(),
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
        }
    }
}

impl Identifiable for WorkProgramModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Reviewable for WorkProgramModel {
    const KIND: EntityKind = EntityKind::WorkProgram;

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

impl AssetOwner for WorkProgramModel {}
