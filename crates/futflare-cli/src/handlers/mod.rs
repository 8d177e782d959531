pub mod capsule_create;
pub mod capsule_list;
pub mod capsule_show;
pub mod config;
