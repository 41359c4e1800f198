use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;

use crate::authorization::{PermissionTable, PolicyError, RoleConfig};

/// `policy` section of the settings
#[derive(Debug, Deserialize, Clone, Default)]
#[readonly::make]
pub struct PolicySettings {
    /// Role name -> permissions. Left empty, the built-in table is used.
    #[serde(default)]
    pub roles: HashMap<String, RoleConfig>,
}

impl PolicySettings {
    pub fn permission_table(&self) -> Result<PermissionTable, PolicyError> {
        if self.roles.is_empty() {
            info!("No roles configured, using the built-in permission table");
            return Ok(PermissionTable::builtin());
        }

        let table = PermissionTable::from_role_configs(&self.roles)?;
        info!(
            "Authorization policy loaded with {} roles",
            self.roles.len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmkt_types::{Permission, Role};

    #[test]
    fn test_empty_policy_uses_builtin() {
        let settings = PolicySettings::default();
        assert_eq!(
            settings.permission_table().unwrap(),
            PermissionTable::builtin()
        );
    }

    #[test]
    fn test_policy_from_yaml() {
        let settings: PolicySettings = serde_norway::from_str(
            r#"
roles:
  admin:
    description: Administrador
    permissions: ["*"]
  finance:
    permissions: [view_finance, approve_reimbursements]
  juridico:
    permissions: [review_reimbursements]
  coordenador:
    permissions: [approve_local_reimbursements, transfer_assets]
  hub:
    permissions: [create_reimbursement]
  viewer:
    permissions: [view_dashboards]
"#,
        )
        .unwrap();

        let table = settings.permission_table().unwrap();
        assert!(table.contains(Role::Finance, Permission::ApproveReimbursements));
        assert!(!table.contains(Role::Finance, Permission::ViewAssets));
        assert!(table.contains(Role::Coordinator, Permission::TransferAssets));
    }

    #[test]
    fn test_incomplete_policy_is_rejected() {
        let settings: PolicySettings = serde_norway::from_str(
            r#"
roles:
  admin:
    permissions: ["*"]
"#,
        )
        .unwrap();
        assert!(matches!(
            settings.permission_table(),
            Err(PolicyError::MissingRole(_))
        ));
    }
}
