use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five reviewable record kinds.
///
/// Dispatch over kinds is always an exhaustive `match`, so adding a kind is a
/// compile-time checked change everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    WorkProgram,
    Event,
    Finance,
    Document,
    Letter,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::WorkProgram,
        EntityKind::Event,
        EntityKind::Finance,
        EntityKind::Document,
        EntityKind::Letter,
    ];

    /// Human readable label used in approval notes and activity descriptions
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::WorkProgram => "Work program",
            EntityKind::Event => "Event",
            EntityKind::Finance => "Finance record",
            EntityKind::Document => "Document",
            EntityKind::Letter => "Letter",
        }
    }

    /// Every approval entity type that belongs to this kind
    pub fn approval_entity_types(&self) -> &'static [ApprovalEntityType] {
        match self {
            EntityKind::WorkProgram => &[ApprovalEntityType::WorkProgram],
            EntityKind::Event => &[ApprovalEntityType::Event],
            EntityKind::Finance => &[ApprovalEntityType::Finance],
            EntityKind::Document => &[
                ApprovalEntityType::Document,
                ApprovalEntityType::DocumentProposal,
                ApprovalEntityType::DocumentAccountabilityReport,
            ],
            EntityKind::Letter => &[ApprovalEntityType::Letter],
        }
    }

    pub fn audit_entity_type(&self) -> AuditEntityType {
        match self {
            EntityKind::WorkProgram => AuditEntityType::WorkProgram,
            EntityKind::Event => AuditEntityType::Event,
            EntityKind::Finance => AuditEntityType::Finance,
            EntityKind::Document => AuditEntityType::Document,
            EntityKind::Letter => AuditEntityType::Letter,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::WorkProgram => write!(f, "WorkProgram"),
            EntityKind::Event => write!(f, "Event"),
            EntityKind::Finance => write!(f, "Finance"),
            EntityKind::Document => write!(f, "Document"),
            EntityKind::Letter => write!(f, "Letter"),
        }
    }
}

/// Entity type tag stored on an approval row.
///
/// Documents are reviewed under one of three tags depending on their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "approval_entity_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ApprovalEntityType {
    WorkProgram,
    Event,
    Finance,
    Document,
    DocumentProposal,
    DocumentAccountabilityReport,
    Letter,
}

impl ApprovalEntityType {
    pub fn kind(&self) -> EntityKind {
        match self {
            ApprovalEntityType::WorkProgram => EntityKind::WorkProgram,
            ApprovalEntityType::Event => EntityKind::Event,
            ApprovalEntityType::Finance => EntityKind::Finance,
            ApprovalEntityType::Document
            | ApprovalEntityType::DocumentProposal
            | ApprovalEntityType::DocumentAccountabilityReport => EntityKind::Document,
            ApprovalEntityType::Letter => EntityKind::Letter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalEntityType::WorkProgram => "WORK_PROGRAM",
            ApprovalEntityType::Event => "EVENT",
            ApprovalEntityType::Finance => "FINANCE",
            ApprovalEntityType::Document => "DOCUMENT",
            ApprovalEntityType::DocumentProposal => "DOCUMENT_PROPOSAL",
            ApprovalEntityType::DocumentAccountabilityReport => "DOCUMENT_ACCOUNTABILITY_REPORT",
            ApprovalEntityType::Letter => "LETTER",
        }
    }
}

impl std::fmt::Display for ApprovalEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalEntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK_PROGRAM" => Ok(ApprovalEntityType::WorkProgram),
            "EVENT" => Ok(ApprovalEntityType::Event),
            "FINANCE" => Ok(ApprovalEntityType::Finance),
            "DOCUMENT" => Ok(ApprovalEntityType::Document),
            "DOCUMENT_PROPOSAL" => Ok(ApprovalEntityType::DocumentProposal),
            "DOCUMENT_ACCOUNTABILITY_REPORT" => Ok(ApprovalEntityType::DocumentAccountabilityReport),
            "LETTER" => Ok(ApprovalEntityType::Letter),
            _ => Err(format!("Unknown approval entity type: {s}")),
        }
    }
}

/// Entity type recorded on activity log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "audit_entity_type", rename_all = "PascalCase"))]
pub enum AuditEntityType {
    Approval,
    WorkProgram,
    Event,
    Finance,
    Document,
    Letter,
    Management,
}

impl From<AuditEntityType> for &str {
    fn from(val: AuditEntityType) -> Self {
        match val {
            AuditEntityType::Approval => "Approval",
            AuditEntityType::WorkProgram => "WorkProgram",
            AuditEntityType::Event => "Event",
            AuditEntityType::Finance => "Finance",
            AuditEntityType::Document => "Document",
            AuditEntityType::Letter => "Letter",
            AuditEntityType::Management => "Management",
        }
    }
}
