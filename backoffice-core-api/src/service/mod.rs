pub mod activity_logger;
pub mod approval_service;
pub mod bulk_approval_service;
pub mod object_store;

pub use activity_logger::*;
pub use approval_service::*;
pub use bulk_approval_service::*;
pub use object_store::*;
