pub mod modules;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod users;
