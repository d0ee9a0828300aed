use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_category", rename_all = "PascalCase")]
pub enum DocumentCategory {
    General,
    Proposal,
    AccountabilityReport,
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentCategory::General => write!(f, "General"),
            DocumentCategory::Proposal => write!(f, "Proposal"),
            DocumentCategory::AccountabilityReport => write!(f, "AccountabilityReport"),
        }
    }
}

impl FromStr for DocumentCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(DocumentCategory::General),
            "Proposal" => Ok(DocumentCategory::Proposal),
            "AccountabilityReport" => Ok(DocumentCategory::AccountabilityReport),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "finance_flow", rename_all = "PascalCase")]
pub enum FinanceFlow {
    Income,
    Expense,
}

impl std::fmt::Display for FinanceFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinanceFlow::Income => write!(f, "Income"),
            FinanceFlow::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for FinanceFlow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(FinanceFlow::Income),
            "Expense" => Ok(FinanceFlow::Expense),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "letter_direction", rename_all = "PascalCase")]
pub enum LetterDirection {
    Incoming,
    Outgoing,
}

impl std::fmt::Display for LetterDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LetterDirection::Incoming => write!(f, "Incoming"),
            LetterDirection::Outgoing => write!(f, "Outgoing"),
        }
    }
}

impl FromStr for LetterDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Incoming" => Ok(LetterDirection::Incoming),
            "Outgoing" => Ok(LetterDirection::Outgoing),
            _ => Err(()),
        }
    }
}
