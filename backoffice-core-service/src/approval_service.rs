use async_trait::async_trait;
use backoffice_core_api::domain::{
    Approval, ApprovalEntityType, ApprovalPage, ApprovalStatus, ApprovalView, ActivityType,
    AuditEntityType, CreateApprovalRequest, EntityKind, ListApprovalsRequest, UpdateApprovalRequest,
};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::{ActivityLogger, ApprovalService};
use backoffice_core_db::models::approval::{ApprovalHistoryModel, ApprovalModel};
use backoffice_core_db::repository::{find_latest_by_entity, load_one, PageRequest};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::activity::{activity_entry, record_activity, snapshot};
use crate::config::{ApprovalPolicy, ApprovalUniqueness};
use crate::repositories::{Db, ServiceRepositories};
use crate::synchronizer::EntityStatusSynchronizer;

pub struct ApprovalServiceImpl {
    repos: ServiceRepositories,
    activity: Arc<dyn ActivityLogger>,
    synchronizer: EntityStatusSynchronizer,
    uniqueness: ApprovalUniqueness,
}

impl ApprovalServiceImpl {
    pub fn new(repos: ServiceRepositories, activity: Arc<dyn ActivityLogger>, policy: ApprovalPolicy) -> Self {
        let synchronizer = EntityStatusSynchronizer::new(repos.clone(), policy.cancelled_transition);
        Self {
            repos,
            activity,
            synchronizer,
            uniqueness: policy.uniqueness,
        }
    }

    /// Latest approval of an entity across every tag of its kind
    pub async fn latest_for(&self, kind: EntityKind, entity_id: Uuid) -> ApiResult<Option<ApprovalModel>> {
        Ok(find_latest_by_entity::<Db, _>(
            self.repos.approvals.as_ref(),
            kind.approval_entity_types(),
            entity_id,
        )
        .await?)
    }

    /// Resets an approval to PENDING after its entity changed
    pub async fn reopen(
        &self,
        mut approval: ApprovalModel,
        note: Option<String>,
        actor_id: Uuid,
    ) -> ApiResult<ApprovalModel> {
        let previous_status = approval.status;
        approval.status = ApprovalStatus::Pending;
        if note.is_some() {
            approval.note = note;
        }
        approval.updated_at = Utc::now();
        let reopened = self.save(approval, actor_id).await?;

        info!(approval_id = %reopened.id, from = %previous_status, "approval reopened");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Submit,
                AuditEntityType::Approval,
                reopened.id,
                format!("Approval for {} reopened", reopened.entity_type.kind().label()),
                Some(json!({ "status": previous_status })),
                Some(json!({ "status": reopened.status, "note": reopened.note })),
            ),
        )
        .await;

        Ok(reopened)
    }

    /// Puts an entity under review: the latest approval is reset to
    /// PENDING if there is one, otherwise a new one is opened.
    pub async fn submit_for_review(
        &self,
        entity_type: ApprovalEntityType,
        entity_id: Uuid,
        submitter_id: Uuid,
        note: Option<String>,
    ) -> ApiResult<ApprovalModel> {
        if let Some(latest) = self.latest_for(entity_type.kind(), entity_id).await? {
            return self.reopen(latest, note, submitter_id).await;
        }

        let created = self
            .insert(ApprovalModel::new_pending(entity_type, entity_id, submitter_id, note))
            .await?;
        info!(approval_id = %created.id, %entity_type, %entity_id, "submitted for review");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                submitter_id,
                ActivityType::Submit,
                AuditEntityType::Approval,
                created.id,
                format!("{} submitted for approval", entity_type.kind().label()),
                None,
                snapshot(&created),
            ),
        )
        .await;
        Ok(created)
    }

    /// Hard-deletes every approval of an entity. History rows are kept.
    pub async fn delete_for_entity(&self, kind: EntityKind, entity_id: Uuid) -> ApiResult<usize> {
        let approvals = self
            .repos
            .approvals
            .find_by_entity(kind.approval_entity_types(), entity_id)
            .await?;
        if approvals.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = approvals.iter().map(|a| a.id).collect();
        let deleted = self.repos.approvals.delete_batch(&ids).await?;
        info!(%kind, %entity_id, deleted, "approvals of deleted entity removed");
        Ok(deleted)
    }

    /// Every recorded state of one approval, oldest first
    pub async fn history(&self, approval_id: Uuid) -> ApiResult<Vec<ApprovalHistoryModel>> {
        Ok(self.repos.approvals.load_history(approval_id).await?)
    }

    async fn load(&self, id: Uuid) -> ApiResult<ApprovalModel> {
        load_one::<Db, ApprovalModel, _>(self.repos.approvals.as_ref(), id)
            .await?
            .ok_or_else(|| ApiError::not_found("Approval", id))
    }

    async fn insert(&self, approval: ApprovalModel) -> ApiResult<ApprovalModel> {
        let actor_id = approval.user_id;
        let created = self
            .repos
            .approvals
            .create_batch(vec![approval])
            .await?
            .pop()
            .ok_or_else(|| ApiError::InternalError("Approval insert returned nothing".to_string()))?;
        self.repos
            .approvals
            .append_history(ApprovalHistoryModel::record(&created, actor_id))
            .await?;
        Ok(created)
    }

    async fn save(&self, approval: ApprovalModel, actor_id: Uuid) -> ApiResult<ApprovalModel> {
        let updated = self
            .repos
            .approvals
            .update_batch(vec![approval])
            .await?
            .pop()
            .ok_or_else(|| ApiError::InternalError("Approval update returned nothing".to_string()))?;
        self.repos
            .approvals
            .append_history(ApprovalHistoryModel::record(&updated, actor_id))
            .await?;
        Ok(updated)
    }

    async fn ensure_unique(&self, request: &CreateApprovalRequest) -> ApiResult<()> {
        let kind = request.entity_type.kind();
        match self.uniqueness {
            ApprovalUniqueness::PerSubmitter => {
                let existing = self
                    .repos
                    .approvals
                    .find_by_entity_and_user(request.entity_type, request.entity_id, request.submitter_id)
                    .await?;
                if existing.is_some() {
                    return Err(ApiError::Conflict(format!(
                        "An approval for this {} already exists for this submitter",
                        kind.label().to_lowercase()
                    )));
                }
            }
            ApprovalUniqueness::PerEntity => {
                let existing = self
                    .repos
                    .approvals
                    .find_by_entity(kind.approval_entity_types(), request.entity_id)
                    .await?;
                if existing.iter().any(|approval| approval.status.is_open()) {
                    return Err(ApiError::Conflict(format!(
                        "This {} already has an open approval",
                        kind.label().to_lowercase()
                    )));
                }
            }
        }
        Ok(())
    }

    async fn view(&self, approval: ApprovalModel) -> ApiResult<ApprovalView> {
        let entity = self
            .repos
            .summary(approval.entity_type.kind(), approval.entity_id)
            .await?;
        Ok(ApprovalView {
            approval: approval.into(),
            entity,
        })
    }
}

#[async_trait]
impl ApprovalService for ApprovalServiceImpl {
    async fn create_approval(&self, request: CreateApprovalRequest) -> ApiResult<Approval> {
        request.validate()?;

        let kind = request.entity_type.kind();
        if !self.repos.exists(kind, request.entity_id).await? {
            return Err(ApiError::not_found(kind.label(), request.entity_id));
        }
        self.ensure_unique(&request).await?;

        let created = self
            .insert(ApprovalModel::new_pending(
                request.entity_type,
                request.entity_id,
                request.submitter_id,
                request.note,
            ))
            .await?;

        info!(approval_id = %created.id, entity_type = %created.entity_type, entity_id = %created.entity_id, "approval created");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                created.user_id,
                ActivityType::Create,
                AuditEntityType::Approval,
                created.id,
                format!("Approval requested for {}", kind.label().to_lowercase()),
                None,
                snapshot(&created),
            ),
        )
        .await;

        Ok(created.into())
    }

    async fn update_approval(
        &self,
        id: Uuid,
        request: UpdateApprovalRequest,
        actor_id: Uuid,
    ) -> ApiResult<Approval> {
        request.validate()?;

        let mut approval = self.load(id).await?;
        let old_data = json!({ "status": approval.status, "note": approval.note });

        approval.status = request.status;
        if request.note.is_some() {
            approval.note = request.note;
        }
        approval.updated_at = Utc::now();
        let updated = self.save(approval, actor_id).await?;

        self.synchronizer
            .apply(updated.entity_type, updated.entity_id, updated.status)
            .await?;

        info!(approval_id = %updated.id, status = %updated.status, actor_id = %actor_id, "approval updated");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Review,
                AuditEntityType::Approval,
                updated.id,
                format!("Approval {}", updated.status.to_string().to_lowercase()),
                Some(old_data),
                Some(json!({ "status": updated.status, "note": updated.note })),
            ),
        )
        .await;

        Ok(updated.into())
    }

    async fn delete_approval(&self, id: Uuid, actor_id: Uuid) -> ApiResult<()> {
        let approval = self.load(id).await?;
        self.repos.approvals.delete_batch(&[id]).await?;

        info!(approval_id = %id, actor_id = %actor_id, "approval deleted");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Delete,
                AuditEntityType::Approval,
                id,
                "Approval deleted",
                snapshot(&approval),
                None,
            ),
        )
        .await;

        Ok(())
    }

    async fn find_approval(&self, id: Uuid) -> ApiResult<Option<ApprovalView>> {
        match load_one::<Db, ApprovalModel, _>(self.repos.approvals.as_ref(), id).await? {
            Some(approval) => Ok(Some(self.view(approval).await?)),
            None => Ok(None),
        }
    }

    async fn list_approvals(&self, request: ListApprovalsRequest) -> ApiResult<ApprovalPage> {
        request.validate()?;

        let page = self
            .repos
            .approvals
            .list(&request.filter, PageRequest::for_page(request.limit, request.page))
            .await?;
        let pagination = page.pagination();

        let mut items = Vec::with_capacity(page.items.len());
        for approval in page.items {
            items.push(self.view(approval).await?);
        }

        Ok(ApprovalPage { items, pagination })
    }
}
