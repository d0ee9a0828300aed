pub mod approval_repository;

pub use approval_repository::ApprovalRepositoryImpl;
