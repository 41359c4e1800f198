//! Authorization model for the StarMKT back offices
//!
//! Two schemes coexist: StarMKT OS maps a single role to fine-grained
//! permissions through a [`PermissionTable`], while the Reembolsos portal
//! stores per-module access levels for each actor. Both are answered through
//! [`CapabilityResolver`]. Everything here is pure: callers fetch the role or
//! the grant rows and pass them in.

pub mod capability;
pub mod error;
pub mod module_access;
pub mod permission_table;
pub mod roles;
pub mod types;


pub use capability::{Authorizer, Capabilities, Capability, CapabilityResolver, Decision, DenyReason};
pub use error::PolicyError;
pub use module_access::{can_manage, can_write, grants_from_rows, has_any_access, level_for, GrantRow};
pub use permission_table::PermissionTable;
pub use roles::RoleResolver;
pub use types::{PermissionOrWildcard, RoleConfig};
