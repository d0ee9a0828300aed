use backoffice_core_api::domain::{ApprovalEntityType, EntityKind, PublicationStatus};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common_enums::DocumentCategory;
use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{AssetOwner, Reviewable};

/// # Documentation
/// Database model for an organization document.
///
/// The category decides which approval tag the document is reviewed under:
/// proposals and accountability reports have their own queues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub id: Uuid,
    pub name: HeaplessString<255>,
    pub category: DocumentCategory,
    pub content: Option<String>,
    pub work_program_id: Option<Uuid>,
    pub status: PublicationStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(PartialEq)]
struct DocumentSubstance<'a> {
    name: &'a str,
    category: DocumentCategory,
    content: Option<&'a str>,
    work_program_id: Option<Uuid>,
}

impl DocumentModel {
    fn substance(&self) -> DocumentSubstance<'_> {
        DocumentSubstance {
            name: &self.name,
            category: self.category,
            content: self.content.as_deref(),
            work_program_id: self.work_program_id,
        }
    }
}

impl Identifiable for DocumentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Reviewable for DocumentModel {
    const KIND: EntityKind = EntityKind::Document;

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

    fn approval_entity_type(&self) -> ApprovalEntityType {
        match self.category {
            DocumentCategory::General => ApprovalEntityType::Document,
            DocumentCategory::Proposal => ApprovalEntityType::DocumentProposal,
            DocumentCategory::AccountabilityReport => ApprovalEntityType::DocumentAccountabilityReport,
        }
    }
}

impl AssetOwner for DocumentModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selects_approval_tag() {
        let now = Utc::now();
        let mut document = DocumentModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from("Annual report").unwrap(),
            category: DocumentCategory::AccountabilityReport,
            content: None,
            work_program_id: None,
            status: PublicationStatus::Draft,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            document.approval_entity_type(),
            ApprovalEntityType::DocumentAccountabilityReport
        );

        document.category = DocumentCategory::General;
        assert_eq!(document.approval_entity_type(), ApprovalEntityType::Document);
    }
}
