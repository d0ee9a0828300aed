//! Create, edit and delete of the reviewable record kinds.
//!
//! One generic service serves all five kinds. Every save runs the asset
//! reconciliation around the entity write, and edits go through the
//! resubmission guard before anything is persisted. Superseded objects are
//! staged on the reconciler and released by [`BackofficeServices::commit`].
//!
//! [`BackofficeServices::commit`]: crate::services::BackofficeServices::commit

use backoffice_core_api::domain::{ActivityType, AssetSlot, PublicationStatus};
use backoffice_core_api::error::{ApiError, ApiResult};
use backoffice_core_api::service::ActivityLogger;
use backoffice_core_db::models::reviewable::{AssetOwner, Reviewable};
use backoffice_core_db::repository::{load_one, EntityStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::activity::{activity_entry, record_activity, snapshot};
use crate::approval_service::ApprovalServiceImpl;
use crate::asset::AssetReconciler;
use crate::config::DeletionPolicy;
use crate::repositories::Db;
use crate::resubmission::{reopen_note, submit_note, ResubmissionGuard};

/// New record plus the files to attach to it
#[derive(Debug, Clone)]
pub struct EntityCreate<T> {
    pub entity: T,
    pub assets: Vec<AssetSlot>,
}

/// Edited record. Asset references on `entity` are ignored; files change
/// only through `assets`.
#[derive(Debug, Clone)]
pub struct EntityUpdate<T> {
    pub entity: T,
    /// Status asked for by the editor, if any
    pub requested_status: Option<PublicationStatus>,
    pub assets: Vec<AssetSlot>,
}

pub struct ReviewableEntityService<T: Reviewable + AssetOwner> {
    store: Arc<dyn EntityStore<Db, T>>,
    approvals: Arc<ApprovalServiceImpl>,
    assets: Arc<AssetReconciler>,
    activity: Arc<dyn ActivityLogger>,
    deletion: DeletionPolicy,
}

impl<T: Reviewable + AssetOwner> ReviewableEntityService<T> {
    pub fn new(
        store: Arc<dyn EntityStore<Db, T>>,
        approvals: Arc<ApprovalServiceImpl>,
        assets: Arc<AssetReconciler>,
        activity: Arc<dyn ActivityLogger>,
        deletion: DeletionPolicy,
    ) -> Self {
        Self {
            store,
            approvals,
            assets,
            activity,
            deletion,
        }
    }

    pub async fn find(&self, id: Uuid) -> ApiResult<Option<T>> {
        Ok(load_one::<Db, T, _>(self.store.as_ref(), id).await?)
    }

    pub async fn create(&self, request: EntityCreate<T>, actor_id: Uuid) -> ApiResult<T> {
        let mut entity = request.entity;
        if entity.status() == PublicationStatus::Publish {
            return Err(ApiError::ValidationError(format!(
                "{} can only be published through an approval",
                T::KIND.label()
            )));
        }

        let current = entity.clone();
        let reconciled = self
            .assets
            .reconcile_into(&request.assets, &current, current.title(), &mut entity)
            .await?;
        entity.touch(Utc::now());

        let created = match self.store.create_batch(vec![entity]).await {
            Ok(mut created) => created
                .pop()
                .ok_or_else(|| ApiError::InternalError(format!("{} insert returned nothing", T::KIND)))?,
            Err(e) => {
                self.assets.abandon(&reconciled).await;
                return Err(e.into());
            }
        };
        self.assets.stage(reconciled).await;

        if created.status() == PublicationStatus::Pending {
            self.approvals
                .submit_for_review(
                    created.approval_entity_type(),
                    created.get_id(),
                    actor_id,
                    Some(submit_note(T::KIND, created.title())),
                )
                .await?;
        }

        info!(kind = %T::KIND, id = %created.get_id(), status = %created.status(), "entity created");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Create,
                T::KIND.audit_entity_type(),
                created.get_id(),
                format!("{} \"{}\" created", T::KIND.label(), created.title()),
                None,
                snapshot(&created),
            ),
        )
        .await;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, request: EntityUpdate<T>, actor_id: Uuid) -> ApiResult<T> {
        let persisted = self
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::KIND.label(), id))?;
        if request.entity.get_id() != id {
            return Err(ApiError::ValidationError(format!(
                "{} id does not match the record being edited",
                T::KIND.label()
            )));
        }

        let latest = self.approvals.latest_for(T::KIND, id).await?;
        let plan = ResubmissionGuard::evaluate(
            &persisted,
            &request.entity,
            latest.as_ref(),
            request.requested_status,
        )?;

        let mut entity = request.entity;
        entity.set_status(plan.status);
        for class in T::ASSET_CLASSES {
            entity
                .set_asset_ref(*class, persisted.asset_ref(*class))
                .map_err(ApiError::ValidationError)?;
        }

        let owner_name = entity.title().to_string();
        let reconciled = self
            .assets
            .reconcile_into(&request.assets, &persisted, &owner_name, &mut entity)
            .await?;
        entity.touch(Utc::now());

        let updated = match self.store.update_batch(vec![entity]).await {
            Ok(mut updated) => updated
                .pop()
                .ok_or_else(|| ApiError::InternalError(format!("{} update returned nothing", T::KIND)))?,
            Err(e) => {
                self.assets.abandon(&reconciled).await;
                return Err(e.into());
            }
        };
        // Replaced objects are released once the unit of work commits
        self.assets.stage(reconciled).await;

        if let Some(approval) = plan.reopen {
            self.approvals
                .reopen(approval, Some(reopen_note(T::KIND)), actor_id)
                .await?;
        }
        if plan.submit {
            self.approvals
                .submit_for_review(
                    updated.approval_entity_type(),
                    id,
                    actor_id,
                    Some(submit_note(T::KIND, updated.title())),
                )
                .await?;
        }

        info!(
            kind = %T::KIND,
            %id,
            status = %updated.status(),
            has_changes = plan.has_changes,
            "entity updated"
        );
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Update,
                T::KIND.audit_entity_type(),
                id,
                format!("{} \"{}\" updated", T::KIND.label(), updated.title()),
                snapshot(&persisted),
                snapshot(&updated),
            ),
        )
        .await;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, actor_id: Uuid) -> ApiResult<()> {
        let persisted = self
            .find(id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::KIND.label(), id))?;

        self.store.delete_batch(&[id]).await?;
        if self.deletion.cascade_approvals {
            self.approvals.delete_for_entity(T::KIND, id).await?;
        }
        if self.deletion.cascade_assets {
            self.assets.stage_release(&persisted).await;
        }

        info!(kind = %T::KIND, %id, "entity deleted");
        record_activity(
            self.activity.as_ref(),
            activity_entry(
                actor_id,
                ActivityType::Delete,
                T::KIND.audit_entity_type(),
                id,
                format!("{} \"{}\" deleted", T::KIND.label(), persisted.title()),
                snapshot(&persisted),
                None,
            ),
        )
        .await;

        Ok(())
    }
}
