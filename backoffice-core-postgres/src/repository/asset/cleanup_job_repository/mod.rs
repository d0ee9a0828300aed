pub mod repo_impl;
pub mod create_batch;
pub mod update_batch;
pub mod delete_batch;
pub mod find_pending;

pub use repo_impl::CleanupJobRepositoryImpl;
