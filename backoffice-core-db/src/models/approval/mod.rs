pub mod approval;
pub mod approval_history;

pub use approval::*;
pub use approval_history::*;
