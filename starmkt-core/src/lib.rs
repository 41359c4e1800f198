pub mod admin;
pub mod authorization;
pub mod navigation;
pub mod settings;

// Domain types live in starmkt-types so the front ends can share them
pub use starmkt_types::{AccessLevel, AccessMode, Module, ModuleGrant, Permission, Role};
