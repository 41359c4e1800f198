use std::sync::Arc;

use starmkt_types::{AccessMode, Permission, Role};
use tracing::debug;

use super::permission_table::PermissionTable;

/// Answers role -> permission questions against a shared table.
///
/// Every check fails closed: a role without an entry, or a role/permission
/// string that does not parse, is denied.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    table: Arc<PermissionTable>,
}

impl RoleResolver {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Check if a role holds a permission
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        let allowed = self.table.contains(role, permission);
        debug!(
            "Role check: role='{}', permission='{}', allowed={}",
            role, permission, allowed
        );
        allowed
    }

    /// Same as [`RoleResolver::has_permission`] for raw values read from a profile
    pub fn has_permission_str(&self, role: &str, permission: &str) -> bool {
        match (Role::from_str(role), Permission::from_str(permission)) {
            (Some(role), Some(permission)) => self.has_permission(role, permission),
            _ => {
                debug!(
                    "Role check denied for unrecognized input: role='{}', permission='{}'",
                    role, permission
                );
                false
            }
        }
    }

    /// Sorted permission set of a role, empty if the role has no entry
    pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
        self.table
            .permissions_for(role)
            .map(|permissions| permissions.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn can_manage_finance(&self, role: Role) -> bool {
        self.has_permission(role, Permission::ViewFinance)
    }

    /// Hub-level approval, the coordinator stage
    pub fn can_approve_local_reimbursements(&self, role: Role) -> bool {
        self.has_permission(role, Permission::ApproveLocalReimbursements)
    }

    /// Finance-stage approval
    pub fn can_approve_finance_reimbursements(&self, role: Role) -> bool {
        self.has_permission(role, Permission::ApproveReimbursements)
    }

    /// Legal-stage review
    pub fn can_review_reimbursements(&self, role: Role) -> bool {
        self.has_permission(role, Permission::ReviewReimbursements)
    }

    pub fn can_transfer_assets(&self, role: Role) -> bool {
        self.has_permission(role, Permission::TransferAssets)
    }

    /// Only admins see every hub. Everyone else is scoped to their own hub by
    /// the datastore's row-level rules; this only shapes queries and UI.
    pub fn can_read_all_hubs(&self, role: Role) -> bool {
        role == Role::Admin
    }

    pub fn can_read_all_hubs_str(&self, role: &str) -> bool {
        Role::from_str(role).is_some_and(|role| self.can_read_all_hubs(role))
    }

    /// Coarse fallback where no finer permission exists
    pub fn access_mode(&self, role: Role) -> AccessMode {
        match role {
            Role::Viewer => AccessMode::Read,
            _ => AccessMode::Write,
        }
    }

    /// Unrecognized roles get `Read`
    pub fn access_mode_str(&self, role: &str) -> AccessMode {
        Role::from_str(role)
            .map(|role| self.access_mode(role))
            .unwrap_or(AccessMode::Read)
    }

    /// Roles holding a permission, in display order
    pub fn roles_with(&self, permission: Permission) -> Vec<Role> {
        Role::all()
            .into_iter()
            .filter(|role| self.table.contains(*role, permission))
            .collect()
    }
}

impl Default for RoleResolver {
    fn default() -> Self {
        Self::new(Arc::new(PermissionTable::builtin()))
    }
}
