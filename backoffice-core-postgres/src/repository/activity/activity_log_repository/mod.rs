pub mod repo_impl;
pub mod create_batch;
pub mod find_by_entity;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ActivityLogRepositoryImpl;
