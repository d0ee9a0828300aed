use anyhow::{anyhow, Context, Result};
use backoffice_core_api::domain::AssetClass;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which existing approvals block `create_approval`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalUniqueness {
    /// One approval per (entity type, entity, submitter)
    #[default]
    PerSubmitter,
    /// At most one open (PENDING or CANCELLED) approval per entity
    PerEntity,
}

impl FromStr for ApprovalUniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_submitter" => Ok(ApprovalUniqueness::PerSubmitter),
            "per_entity" => Ok(ApprovalUniqueness::PerEntity),
            other => Err(format!("expected per_submitter or per_entity, got {other}")),
        }
    }
}

/// Entity status applied when an approval is moved to CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelledTransition {
    /// Leave the entity status as it is
    #[default]
    Untouched,
    Draft,
    Pending,
}

impl FromStr for CancelledTransition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CancelledTransition::Untouched),
            "draft" => Ok(CancelledTransition::Draft),
            "pending" => Ok(CancelledTransition::Pending),
            other => Err(format!("expected none, draft or pending, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApprovalPolicy {
    pub uniqueness: ApprovalUniqueness,
    pub cancelled_transition: CancelledTransition,
}

/// What happens to dependents when a record is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionPolicy {
    pub cascade_approvals: bool,
    pub cascade_assets: bool,
}

impl Default for DeletionPolicy {
    fn default() -> Self {
        Self {
            cascade_approvals: false,
            cascade_assets: true,
        }
    }
}

/// Destination folder of every asset class in the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFolders {
    pub finance_proof: String,
    pub event_thumbnail: String,
    pub management_decree: String,
    pub management_structure: String,
}

impl AssetFolders {
    pub fn folder_for(&self, class: AssetClass) -> &str {
        match class {
            AssetClass::FinanceProof => &self.finance_proof,
            AssetClass::EventThumbnail => &self.event_thumbnail,
            AssetClass::ManagementDecree => &self.management_decree,
            AssetClass::ManagementStructure => &self.management_structure,
        }
    }
}

/// Deferred deletion of replaced objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupConfig {
    /// Wait between scheduling and the first delete attempt
    pub delay: Duration,
    pub max_attempts: u32,
    /// Base wait between attempts, doubled after each failure
    pub backoff: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(5000),
            max_attempts: 3,
            backoff: Duration::from_millis(1000),
        }
    }
}

impl CleanupConfig {
    /// Wait before retry number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1u32 << exponent)
    }
}

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub asset_folders: AssetFolders,
    pub cleanup: CleanupConfig,
    pub approval: ApprovalPolicy,
    pub deletion: DeletionPolicy,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| get(key).ok_or_else(|| anyhow!("{key} must be set"));

        let defaults = CleanupConfig::default();
        let cleanup = CleanupConfig {
            delay: Duration::from_millis(parse_or(&get, "ASSET_CLEANUP_DELAY_MS", defaults.delay.as_millis() as u64)?),
            max_attempts: parse_or(&get, "ASSET_CLEANUP_MAX_ATTEMPTS", defaults.max_attempts)?,
            backoff: Duration::from_millis(parse_or(&get, "ASSET_CLEANUP_BACKOFF_MS", defaults.backoff.as_millis() as u64)?),
        };
        if cleanup.max_attempts == 0 {
            return Err(anyhow!("ASSET_CLEANUP_MAX_ATTEMPTS must be at least 1"));
        }

        let deletion_defaults = DeletionPolicy::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            asset_folders: AssetFolders {
                finance_proof: required("ASSET_FOLDER_FINANCE_PROOF")?,
                event_thumbnail: required("ASSET_FOLDER_EVENT_THUMBNAIL")?,
                management_decree: required("ASSET_FOLDER_MANAGEMENT_DECREE")?,
                management_structure: required("ASSET_FOLDER_MANAGEMENT_STRUCTURE")?,
            },
            cleanup,
            approval: ApprovalPolicy {
                uniqueness: parse_or(&get, "APPROVAL_UNIQUENESS", ApprovalUniqueness::default())?,
                cancelled_transition: parse_or(
                    &get,
                    "APPROVAL_CANCELLED_TRANSITION",
                    CancelledTransition::default(),
                )?,
            },
            deletion: DeletionPolicy {
                cascade_approvals: parse_or(&get, "DELETE_CASCADE_APPROVALS", deletion_defaults.cascade_approvals)?,
                cascade_assets: parse_or(&get, "DELETE_CASCADE_ASSETS", deletion_defaults.cascade_assets)?,
            },
        })
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value: {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgresql://localhost/backoffice"),
            ("ASSET_FOLDER_FINANCE_PROOF", "folder-finance"),
            ("ASSET_FOLDER_EVENT_THUMBNAIL", "folder-event"),
            ("ASSET_FOLDER_MANAGEMENT_DECREE", "folder-decree"),
            ("ASSET_FOLDER_MANAGEMENT_STRUCTURE", "folder-structure"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<ServiceConfig> {
        ServiceConfig::from_source(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.cleanup, CleanupConfig::default());
        assert_eq!(config.approval.uniqueness, ApprovalUniqueness::PerSubmitter);
        assert_eq!(config.approval.cancelled_transition, CancelledTransition::Untouched);
        assert!(!config.deletion.cascade_approvals);
        assert!(config.deletion.cascade_assets);
        assert_eq!(config.asset_folders.folder_for(AssetClass::EventThumbnail), "folder-event");
    }

    #[test]
    fn test_overrides() {
        let mut vars = base_env();
        vars.insert("ASSET_CLEANUP_DELAY_MS", "250");
        vars.insert("APPROVAL_UNIQUENESS", "per_entity");
        vars.insert("APPROVAL_CANCELLED_TRANSITION", "draft");
        vars.insert("DELETE_CASCADE_APPROVALS", "true");

        let config = load(&vars).unwrap();

        assert_eq!(config.cleanup.delay, Duration::from_millis(250));
        assert_eq!(config.approval.uniqueness, ApprovalUniqueness::PerEntity);
        assert_eq!(config.approval.cancelled_transition, CancelledTransition::Draft);
        assert!(config.deletion.cascade_approvals);
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let mut vars = base_env();
        vars.remove("ASSET_FOLDER_FINANCE_PROOF");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("ASSET_FOLDER_FINANCE_PROOF"));

        let mut vars = base_env();
        vars.insert("APPROVAL_CANCELLED_TRANSITION", "archived");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("APPROVAL_CANCELLED_TRANSITION"));

        let mut vars = base_env();
        vars.insert("ASSET_CLEANUP_MAX_ATTEMPTS", "0");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_backoff_doubles() {
        let config = CleanupConfig {
            delay: Duration::ZERO,
            max_attempts: 4,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(config.backoff_for(1), Duration::from_millis(100));
        assert_eq!(config.backoff_for(3), Duration::from_millis(400));
    }
}
