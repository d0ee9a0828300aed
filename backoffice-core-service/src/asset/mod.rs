pub mod cleanup;
pub mod journal;
pub mod reconciler;
pub mod reference;

pub use cleanup::CleanupQueue;
pub use journal::{CleanupJournal, PostgresCleanupJournal};
pub use reconciler::{AssetPlan, AssetReconciler, ReconciledAssets};
pub use reference::extract_object_id;
