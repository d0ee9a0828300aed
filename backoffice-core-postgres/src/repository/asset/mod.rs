pub mod cleanup_job_repository;

pub use cleanup_job_repository::CleanupJobRepositoryImpl;
