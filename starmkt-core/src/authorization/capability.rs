use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use starmkt_types::{AccessLevel, Module, ModuleGrant, Permission, Role};
use tracing::debug;

use super::module_access;
use super::permission_table::PermissionTable;
use super::roles::RoleResolver;

/// What an actor brings to a check, tagged by the scheme their data follows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum Capabilities {
    /// StarMKT OS: a single role mapped through the permission table
    Role { role: Role },
    /// Reembolsos: per-module grants stored for the actor
    Grants { grants: Vec<ModuleGrant> },
}

impl Capabilities {
    pub fn role(role: Role) -> Self {
        Capabilities::Role { role }
    }

    pub fn grants(grants: Vec<ModuleGrant>) -> Self {
        Capabilities::Grants { grants }
    }
}

/// What is being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capability {
    Permission { permission: Permission },
    /// Reading data across every hub
    AllHubs,
    /// At least `level` inside `module`
    Module { module: Module, level: AccessLevel },
}

impl Capability {
    pub fn permission(permission: Permission) -> Self {
        Capability::Permission { permission }
    }

    pub fn module(module: Module, level: AccessLevel) -> Self {
        Capability::Module { module, level }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Permission { permission } => write!(f, "permission {permission}"),
            Capability::AllHubs => write!(f, "all hubs"),
            Capability::Module { module, level } => write!(f, "{level} on {module}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
    MissingPermission {
        permission: Permission,
    },
    HubScoped,
    InsufficientLevel {
        module: Module,
        held: AccessLevel,
        required: AccessLevel,
    },
    /// A role was asked a module question or grants a permission question
    SchemeMismatch,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::MissingPermission { permission } => {
                write!(f, "role does not hold '{permission}'")
            }
            DenyReason::HubScoped => write!(f, "role is scoped to its own hub"),
            DenyReason::InsufficientLevel {
                module,
                held,
                required,
            } => write!(f, "holds '{held}' on '{module}', '{required}' required"),
            DenyReason::SchemeMismatch => {
                write!(f, "capability does not apply to this actor's scheme")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(reason),
        }
    }

    fn from_bool(allowed: bool, reason: DenyReason) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny(reason)
        }
    }
}

/// Single entry point for both authorization schemes
pub trait CapabilityResolver {
    fn decide(&self, actor: &Capabilities, capability: &Capability) -> Decision;

    fn allows(&self, actor: &Capabilities, capability: &Capability) -> bool {
        self.decide(actor, capability).is_allowed()
    }
}

/// Table-backed resolver, cheap to clone and share across threads
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    roles: RoleResolver,
}

impl Authorizer {
    pub fn new(table: PermissionTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    pub fn from_shared(table: Arc<PermissionTable>) -> Self {
        Self {
            roles: RoleResolver::new(table),
        }
    }

    /// Role predicates (`can_manage_finance`, `access_mode`, ...)
    pub fn roles(&self) -> &RoleResolver {
        &self.roles
    }

    fn decide_for_role(&self, role: Role, capability: &Capability) -> Decision {
        match capability {
            Capability::Permission { permission } => Decision::from_bool(
                self.roles.has_permission(role, *permission),
                DenyReason::MissingPermission {
                    permission: *permission,
                },
            ),
            Capability::AllHubs => {
                Decision::from_bool(self.roles.can_read_all_hubs(role), DenyReason::HubScoped)
            }
            Capability::Module { .. } => Decision::Deny(DenyReason::SchemeMismatch),
        }
    }

    fn decide_for_grants(grants: &[ModuleGrant], capability: &Capability) -> Decision {
        match capability {
            // `none` never opens a module, whatever level is asked for
            Capability::Module { module, level } => {
                let held = module_access::level_for(grants, *module);
                Decision::from_bool(
                    held.grants_access() && held >= *level,
                    DenyReason::InsufficientLevel {
                        module: *module,
                        held,
                        required: *level,
                    },
                )
            }
            Capability::Permission { .. } | Capability::AllHubs => {
                Decision::Deny(DenyReason::SchemeMismatch)
            }
        }
    }
}

impl CapabilityResolver for Authorizer {
    fn decide(&self, actor: &Capabilities, capability: &Capability) -> Decision {
        let decision = match actor {
            Capabilities::Role { role } => self.decide_for_role(*role, capability),
            Capabilities::Grants { grants } => Self::decide_for_grants(grants, capability),
        };
        debug!("Decision for {}: {:?}", capability, decision);
        decision
    }
}
