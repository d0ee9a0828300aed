pub mod activity_log;
pub mod approval;
pub mod cleanup_job;
pub mod create_batch;
pub mod delete_batch;
pub mod exist_by_ids;
pub mod load_batch;
pub mod pagination;
pub mod store;
pub mod update_batch;

pub use activity_log::*;
pub use approval::*;
pub use cleanup_job::*;
pub use create_batch::*;
pub use delete_batch::*;
pub use exist_by_ids::*;
pub use load_batch::*;
pub use pagination::*;
pub use store::*;
pub use update_batch::*;
