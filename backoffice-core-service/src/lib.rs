//! Approval workflow and external asset lifecycle for the back-office records.

pub mod activity;
pub mod approval_service;
pub mod asset;
pub mod bulk;
pub mod config;
pub mod entity_service;
pub mod management_service;
pub mod repositories;
pub mod resubmission;
pub mod services;
pub mod synchronizer;
pub mod telemetry;

#[cfg(test)]
pub mod test_support;

pub use approval_service::ApprovalServiceImpl;
pub use bulk::{ApprovalUnitOfWork, ApprovalUnits, BulkApprovalCoordinator, PostgresApprovalUnits};
pub use config::ServiceConfig;
pub use services::BackofficeServices;
