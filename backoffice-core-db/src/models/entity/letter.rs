use backoffice_core_api::domain::{EntityKind, PublicationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common_enums::LetterDirection;
use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{AssetOwner, Reviewable};

/// # Documentation
/// Database model for an incoming or outgoing letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterModel {
    pub id: Uuid,
    /// Reference number printed on the letter
    pub number: HeaplessString<100>,
    pub subject: HeaplessString<255>,
    pub recipient: HeaplessString<255>,
    pub direction: LetterDirection,
    pub letter_date: NaiveDate,
    pub content: Option<String>,
    pub status: PublicationStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(PartialEq)]
struct LetterSubstance<'a> {
    number: &'a str,
    subject: &'a str,
    recipient: &'a str,
    direction: LetterDirection,
    letter_date: NaiveDate,
    content: Option<&'a str>,
}

impl LetterModel {
    fn substance(&self) -> LetterSubstance<'_> {
        LetterSubstance {
            number: &self.number,
            subject: &self.subject,
            recipient: &self.recipient,
            direction: self.direction,
            letter_date: self.letter_date,
            content: self.content.as_deref(),
        }
    }
}

impl Identifiable for LetterModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Reviewable for LetterModel {
    const KIND: EntityKind = EntityKind::Letter;

    fn title(&self) -> &str {
        &self.subject
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

impl AssetOwner for LetterModel {}
