pub mod activity;
pub mod approval;
pub mod asset;
pub mod db_init;
pub mod entity;
