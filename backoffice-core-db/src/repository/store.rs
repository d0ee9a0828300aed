//! Composite repository traits consumed by the service layer.
//!
//! Each is implemented automatically for any repository providing the
//! underlying operations, so PostgreSQL repositories and in-memory test
//! doubles plug in the same way.

use sqlx::Database;

use crate::models::activity::ActivityLogModel;
use crate::models::approval::ApprovalModel;
use crate::models::asset::AssetCleanupJobModel;
use crate::models::entity::ManagementModel;
use crate::models::reviewable::{AssetOwner, Reviewable};
use crate::repository::{
    ApprovalHistoryRepository, CreateBatch, DeleteBatch, ExistByIds, FindActivityByEntity,
    FindApprovalByEntity, FindPendingCleanupJobs, ListApprovals, LoadBatch, UpdateBatch,
};

/// Everything the approval services need from the approval table
pub trait ApprovalStore<DB: Database>:
    CreateBatch<DB, ApprovalModel>
    + LoadBatch<DB, ApprovalModel>
    + UpdateBatch<DB, ApprovalModel>
    + DeleteBatch<DB>
    + FindApprovalByEntity<DB>
    + ListApprovals<DB>
    + ApprovalHistoryRepository<DB>
{
}

impl<DB: Database, R> ApprovalStore<DB> for R where
    R: CreateBatch<DB, ApprovalModel>
        + LoadBatch<DB, ApprovalModel>
        + UpdateBatch<DB, ApprovalModel>
        + DeleteBatch<DB>
        + FindApprovalByEntity<DB>
        + ListApprovals<DB>
        + ApprovalHistoryRepository<DB>
{
}

/// CRUD over one reviewable entity kind
pub trait EntityStore<DB: Database, T: Reviewable + AssetOwner>:
    CreateBatch<DB, T> + LoadBatch<DB, T> + UpdateBatch<DB, T> + DeleteBatch<DB> + ExistByIds<DB>
{
}

impl<DB: Database, T: Reviewable + AssetOwner, R> EntityStore<DB, T> for R where
    R: CreateBatch<DB, T> + LoadBatch<DB, T> + UpdateBatch<DB, T> + DeleteBatch<DB> + ExistByIds<DB>
{
}

pub trait ManagementStore<DB: Database>:
    CreateBatch<DB, ManagementModel>
    + LoadBatch<DB, ManagementModel>
    + UpdateBatch<DB, ManagementModel>
    + DeleteBatch<DB>
{
}

impl<DB: Database, R> ManagementStore<DB> for R where
    R: CreateBatch<DB, ManagementModel>
        + LoadBatch<DB, ManagementModel>
        + UpdateBatch<DB, ManagementModel>
        + DeleteBatch<DB>
{
}

pub trait ActivityLogStore<DB: Database>:
    CreateBatch<DB, ActivityLogModel> + FindActivityByEntity<DB>
{
}

impl<DB: Database, R> ActivityLogStore<DB> for R where
    R: CreateBatch<DB, ActivityLogModel> + FindActivityByEntity<DB>
{
}

pub trait CleanupJobStore<DB: Database>:
    CreateBatch<DB, AssetCleanupJobModel>
    + UpdateBatch<DB, AssetCleanupJobModel>
    + DeleteBatch<DB>
    + FindPendingCleanupJobs<DB>
{
}

impl<DB: Database, R> CleanupJobStore<DB> for R where
    R: CreateBatch<DB, AssetCleanupJobModel>
        + UpdateBatch<DB, AssetCleanupJobModel>
        + DeleteBatch<DB>
        + FindPendingCleanupJobs<DB>
{
}
