//! Decides what an edit of a reviewable record does to its approval.

use backoffice_core_api::domain::{EntityKind, PublicationStatus};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_db::models::approval::ApprovalModel;
use backoffice_core_db::models::reviewable::Reviewable;

/// Outcome of [`ResubmissionGuard::evaluate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResubmissionPlan {
    /// Substantive fields differ from the persisted record
    pub has_changes: bool,
    /// Closed approval to reset to PENDING
    pub reopen: Option<ApprovalModel>,
    /// Status to persist with the edit
    pub status: PublicationStatus,
    /// The caller asked for a review
    pub submit: bool,
}

pub struct ResubmissionGuard;

impl ResubmissionGuard {
    pub fn evaluate<T: Reviewable>(
        persisted: &T,
        edited: &T,
        latest: Option<&ApprovalModel>,
        requested: Option<PublicationStatus>,
    ) -> ApiResult<ResubmissionPlan> {
        if requested == Some(PublicationStatus::Publish) && persisted.status() != PublicationStatus::Publish {
            return Err(ApiError::ValidationError(format!(
                "{} can only be published through an approval",
                T::KIND.label()
            )));
        }

        let has_changes = persisted.differs_substantively(edited);

        let reopen = latest
            .filter(|approval| has_changes && approval.status.is_terminal())
            .cloned();

        let status = match (&reopen, requested) {
            (Some(_), _) => PublicationStatus::Pending,
            (None, Some(status)) => status,
            (None, None) => persisted.status(),
        };

        Ok(ResubmissionPlan {
            has_changes,
            reopen,
            status,
            // A reopened approval is already pending again
            submit: requested == Some(PublicationStatus::Pending) && reopen.is_none(),
        })
    }
}

/// Note put on an approval reopened by a substantive edit
pub fn reopen_note(kind: EntityKind) -> String {
    format!("{} updated and resubmitted for approval", kind.label())
}

/// Note put on an approval requested by the record's editor
pub fn submit_note(kind: EntityKind, title: &str) -> String {
    format!("{} \"{}\" submitted for approval", kind.label(), title)
}
