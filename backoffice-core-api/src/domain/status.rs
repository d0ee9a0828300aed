use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of an approval row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "approval_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    /// "Needs revision"; can be reopened like `Pending`
    Cancelled,
}

impl ApprovalStatus {
    /// APPROVED and REJECTED close a review; an edit must reopen them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApprovalStatus::Approved | ApprovalStatus::Rejected)
    }

    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "PENDING"),
            ApprovalStatus::Approved => write!(f, "APPROVED"),
            ApprovalStatus::Rejected => write!(f, "REJECTED"),
            ApprovalStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApprovalStatus::Pending),
            "APPROVED" => Ok(ApprovalStatus::Approved),
            "REJECTED" => Ok(ApprovalStatus::Rejected),
            "CANCELLED" => Ok(ApprovalStatus::Cancelled),
            _ => Err(format!("Invalid ApprovalStatus: {s}")),
        }
    }
}

/// Publication status owned by each reviewable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "publication_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum PublicationStatus {
    Draft,
    Pending,
    Publish,
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicationStatus::Draft => write!(f, "DRAFT"),
            PublicationStatus::Pending => write!(f, "PENDING"),
            PublicationStatus::Publish => write!(f, "PUBLISH"),
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(PublicationStatus::Draft),
            "PENDING" => Ok(PublicationStatus::Pending),
            "PUBLISH" => Ok(PublicationStatus::Publish),
            _ => Err(format!("Invalid PublicationStatus: {s}")),
        }
    }
}
