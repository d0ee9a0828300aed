pub mod activity;
pub mod approval;
pub mod asset;
pub mod entity;
pub mod identifiable;
pub mod reviewable;

pub use activity::*;
pub use approval::*;
pub use asset::*;
pub use entity::*;
pub use identifiable::*;
pub use reviewable::*;
