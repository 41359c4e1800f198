use std::collections::{BTreeMap, BTreeSet, HashMap};

use starmkt_types::{Permission, Role};
use tracing::debug;

use super::error::PolicyError;
use super::types::RoleConfig;

/// Immutable role -> permission set mapping.
///
/// Built once at startup (from configuration or [`PermissionTable::builtin`])
/// and shared by the resolvers. Construction through [`PermissionTable::new`]
/// guarantees the mapping is total over [`Role::all`], that no set is empty,
/// and that `admin` holds every permission any other role holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    roles: BTreeMap<Role, BTreeSet<Permission>>,
}

impl PermissionTable {
    /// Validate and wrap a role mapping
    pub fn new(roles: BTreeMap<Role, BTreeSet<Permission>>) -> Result<Self, PolicyError> {
        Self::validate(&roles)?;
        Ok(Self { roles })
    }

    /// The table both back offices ship with
    pub fn builtin() -> Self {
        use Permission::*;

        let roles = BTreeMap::from([
            (Role::Admin, Permission::all().into_iter().collect()),
            (
                Role::Finance,
                BTreeSet::from([
                    ViewFinance,
                    ApproveReimbursements,
                    ViewAssets,
                    ViewDashboards,
                ]),
            ),
            (
                Role::Legal,
                BTreeSet::from([ReviewReimbursements, ViewAssets, ViewDashboards]),
            ),
            (
                Role::Coordinator,
                BTreeSet::from([
                    ApproveLocalReimbursements,
                    ViewAssets,
                    TransferAssets,
                    ViewDashboards,
                ]),
            ),
            (
                Role::HubManager,
                BTreeSet::from([CreateReimbursement, ViewAssets, ViewDashboards]),
            ),
            (Role::Viewer, BTreeSet::from([ViewDashboards])),
        ]);

        Self { roles }
    }

    /// Build a table from the `policy.roles` section of the settings
    pub fn from_role_configs(configs: &HashMap<String, RoleConfig>) -> Result<Self, PolicyError> {
        let mut roles: BTreeMap<Role, BTreeSet<Permission>> = BTreeMap::new();

        for (name, config) in configs {
            let role =
                Role::from_str(name).ok_or_else(|| PolicyError::UnknownRole(name.clone()))?;
            if roles.contains_key(&role) {
                return Err(PolicyError::DuplicateRole(role));
            }
            let permissions = roles.entry(role).or_default();
            for entry in &config.permissions {
                permissions.extend(entry.expand());
            }
            debug!(
                "Loaded role '{}' with {} permissions",
                role,
                permissions.len()
            );
        }

        Self::new(roles)
    }

    /// Permissions held by a role, `None` if the role has no entry
    pub fn permissions_for(&self, role: Role) -> Option<&BTreeSet<Permission>> {
        self.roles.get(&role)
    }

    pub fn contains(&self, role: Role, permission: Permission) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|permissions| permissions.contains(&permission))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &BTreeSet<Permission>)> {
        self.roles.iter().map(|(role, permissions)| (*role, permissions))
    }

    fn validate(roles: &BTreeMap<Role, BTreeSet<Permission>>) -> Result<(), PolicyError> {
        for role in Role::all() {
            match roles.get(&role) {
                None => return Err(PolicyError::MissingRole(role)),
                Some(permissions) if permissions.is_empty() => {
                    return Err(PolicyError::EmptyRole(role))
                }
                Some(_) => {}
            }
        }

        let admin = roles
            .get(&Role::Admin)
            .ok_or(PolicyError::MissingRole(Role::Admin))?;

        for (role, permissions) in roles {
            let missing: Vec<&str> = permissions
                .difference(admin)
                .map(|p| p.as_str())
                .collect();
            if !missing.is_empty() {
                return Err(PolicyError::AdminNotSuperset {
                    role: *role,
                    missing: missing.join(", "),
                });
            }
        }

        Ok(())
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::types::PermissionOrWildcard;

    fn role_config(permissions: Vec<PermissionOrWildcard>) -> RoleConfig {
        RoleConfig {
            permissions,
            description: String::new(),
        }
    }

    fn builtin_configs() -> HashMap<String, RoleConfig> {
        PermissionTable::builtin()
            .iter()
            .map(|(role, permissions)| {
                (
                    role.as_str().to_string(),
                    role_config(
                        permissions
                            .iter()
                            .map(|p| PermissionOrWildcard::Permission(*p))
                            .collect(),
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let builtin = PermissionTable::builtin();
        let rebuilt = PermissionTable::new(builtin.roles.clone()).unwrap();
        assert_eq!(builtin, rebuilt);
    }

    #[test]
    fn test_builtin_table_is_total() {
        let table = PermissionTable::builtin();
        for role in Role::all() {
            let permissions = table.permissions_for(role).unwrap();
            assert!(!permissions.is_empty(), "{role} has no permissions");
        }
    }

    #[test]
    fn test_from_role_configs_round_trips_builtin() {
        let table = PermissionTable::from_role_configs(&builtin_configs()).unwrap();
        assert_eq!(table, PermissionTable::builtin());
    }

    #[test]
    fn test_from_role_configs_accepts_legacy_names_and_wildcard() {
        let mut configs = builtin_configs();
        let legal = configs.remove("legal").unwrap();
        configs.insert("juridico".to_string(), legal);
        configs.insert(
            "admin".to_string(),
            role_config(vec![PermissionOrWildcard::Wildcard]),
        );

        let table = PermissionTable::from_role_configs(&configs).unwrap();
        assert!(table.contains(Role::Legal, Permission::ReviewReimbursements));
        assert_eq!(
            table.permissions_for(Role::Admin).unwrap().len(),
            Permission::all().len()
        );
    }

    #[test]
    fn test_role_listed_under_two_names_is_rejected() {
        let mut configs = builtin_configs();
        configs.insert(
            "juridico".to_string(),
            role_config(vec![PermissionOrWildcard::Permission(Permission::ViewFinance)]),
        );
        assert_eq!(
            PermissionTable::from_role_configs(&configs),
            Err(PolicyError::DuplicateRole(Role::Legal))
        );
    }

    #[test]
    fn test_duplicate_permissions_collapse() {
        let mut configs = builtin_configs();
        configs.insert(
            "viewer".to_string(),
            role_config(vec![
                PermissionOrWildcard::Permission(Permission::ViewDashboards),
                PermissionOrWildcard::Permission(Permission::ViewDashboards),
            ]),
        );
        let table = PermissionTable::from_role_configs(&configs).unwrap();
        assert_eq!(table.permissions_for(Role::Viewer).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut configs = builtin_configs();
        configs.insert(
            "user".to_string(),
            role_config(vec![PermissionOrWildcard::Permission(
                Permission::ViewDashboards,
            )]),
        );
        assert_eq!(
            PermissionTable::from_role_configs(&configs),
            Err(PolicyError::UnknownRole("user".to_string()))
        );
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let mut configs = builtin_configs();
        configs.remove("coordinator");
        assert_eq!(
            PermissionTable::from_role_configs(&configs),
            Err(PolicyError::MissingRole(Role::Coordinator))
        );
    }

    #[test]
    fn test_empty_role_is_rejected() {
        let mut configs = builtin_configs();
        configs.insert("viewer".to_string(), role_config(vec![]));
        assert_eq!(
            PermissionTable::from_role_configs(&configs),
            Err(PolicyError::EmptyRole(Role::Viewer))
        );
    }

    #[test]
    fn test_admin_must_be_superset() {
        let mut configs = builtin_configs();
        configs.insert(
            "admin".to_string(),
            role_config(vec![PermissionOrWildcard::Permission(
                Permission::ViewDashboards,
            )]),
        );

        let err = PermissionTable::from_role_configs(&configs).unwrap_err();
        assert!(matches!(err, PolicyError::AdminNotSuperset { .. }));
        assert!(err.to_string().starts_with("Role 'admin' is missing permissions"));
    }
}
