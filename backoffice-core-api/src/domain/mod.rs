pub mod action;
pub mod activity;
pub mod approval;
pub mod asset;
pub mod entity_kind;
pub mod status;

pub use action::*;
pub use activity::*;
pub use approval::*;
pub use asset::*;
pub use entity_kind::*;
pub use status::*;
