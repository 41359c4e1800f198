use serde::{Deserialize, Serialize};
use starmkt_types::{AccessLevel, Module, ModuleGrant, Permission, Role};

use crate::authorization::module_access::GrantRow;

/// Payload of the administrative "create user" function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    /// Defaults to `viewer` when omitted
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<GrantRow>,
}

/// Reasons a create-user payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum CreateUserError {
    #[error("Invalid email address '{email}'")]
    InvalidEmail { email: String },

    #[error("Full name must not be empty")]
    MissingFullName,

    #[error("Unknown role '{role}'")]
    UnknownRole { role: String },

    #[error("Unknown module '{module}'")]
    UnknownModule { module: String },

    #[error("Unknown access level '{level}' for module '{module}'")]
    UnknownAccessLevel { module: String, level: String },

    #[error("Module '{module}' is granted more than once")]
    DuplicateGrant { module: Module },

    /// The identity provider or datastore refused the user
    #[error("User could not be created: {message}")]
    Provider { message: String },
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub grants: Vec<ModuleGrant>,
}

/// Row written to `user_permissions` for a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPermissionRow {
    pub user_id: String,
    pub module_name: &'static str,
    pub level: &'static str,
}

impl CreateUserRequest {
    /// Validate the payload. Unlike rows read back from the datastore,
    /// unknown modules or levels here are errors rather than dropped.
    pub fn validate(&self) -> Result<NewUser, CreateUserError> {
        let email = self.email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            return Err(CreateUserError::InvalidEmail {
                email: self.email.clone(),
            });
        }

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(CreateUserError::MissingFullName);
        }

        let role = match self.role.as_deref() {
            None => Role::Viewer,
            Some(role) => Role::from_str(role).ok_or_else(|| CreateUserError::UnknownRole {
                role: role.to_string(),
            })?,
        };

        let mut grants: Vec<ModuleGrant> = Vec::with_capacity(self.permissions.len());
        for row in &self.permissions {
            let module =
                Module::from_str(&row.module_name).ok_or_else(|| CreateUserError::UnknownModule {
                    module: row.module_name.clone(),
                })?;
            let level =
                AccessLevel::from_str(&row.level).ok_or_else(|| CreateUserError::UnknownAccessLevel {
                    module: row.module_name.clone(),
                    level: row.level.clone(),
                })?;
            if grants.iter().any(|grant| grant.module == module) {
                return Err(CreateUserError::DuplicateGrant { module });
            }
            grants.push(ModuleGrant::new(module, level));
        }

        Ok(NewUser {
            email,
            full_name: full_name.to_string(),
            role,
            grants,
        })
    }
}

impl NewUser {
    /// Grants in the shape of the `user_permissions` table. `none` grants are
    /// skipped since an absent row already means no access.
    pub fn permission_rows(&self, user_id: &str) -> Vec<UserPermissionRow> {
        self.grants
            .iter()
            .filter(|grant| grant.level.grants_access())
            .map(|grant| UserPermissionRow {
                user_id: user_id.to_string(),
                module_name: grant.module.datastore_name(),
                level: grant_level_name(grant.level),
            })
            .collect()
    }
}

fn grant_level_name(level: AccessLevel) -> &'static str {
    match level {
        AccessLevel::None => "NONE",
        AccessLevel::Read => "READ",
        AccessLevel::Write => "WRITE",
        AccessLevel::Manage => "MANAGE",
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Request to test a role permission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
pub struct TestPermissionRequest {
    /// Role to test (admin, finance, legal, coordinator, hub_manager, viewer)
    pub role: String,
    /// Permission to test (e.g. view_finance, approve_reimbursements)
    pub permission: String,
}

/// Request to test module access for a set of grants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
pub struct TestModuleAccessRequest {
    /// Module to test (expenses, invoices, materials)
    #[cfg_attr(feature = "clap", arg(value_parser = parse_module_arg))]
    pub module: Module,
    /// Level required, defaults to read
    #[cfg_attr(feature = "clap", arg(long, default_value = "read", value_parser = parse_level_arg))]
    pub level: AccessLevel,
    /// Grants held by the actor, as MODULE=LEVEL (repeatable)
    #[cfg_attr(
        feature = "clap",
        arg(long = "grant", value_parser = crate::authorization::module_access::parse_grant_arg)
    )]
    pub grants: Vec<ModuleGrant>,
}

/// Request to list the permissions of a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
pub struct RolePermissionsRequest {
    pub role: String,
}

#[cfg(feature = "clap")]
fn parse_module_arg(s: &str) -> Result<Module, String> {
    Module::from_str(s).ok_or_else(|| {
        format!("Unknown module '{s}', allowed values are expenses, invoices and materials")
    })
}

#[cfg(feature = "clap")]
fn parse_level_arg(s: &str) -> Result<AccessLevel, String> {
    AccessLevel::from_str(s).ok_or_else(|| {
        format!("Unknown access level '{s}', allowed values are none, read, write and manage")
    })
}

/// Parse a permission name for command line use
pub fn parse_permission_arg(s: &str) -> Result<Permission, String> {
    Permission::from_str(s).ok_or_else(|| {
        let allowed: Vec<&str> = Permission::all().iter().map(|p| p.as_str()).collect();
        format!(
            "Unknown permission '{s}', allowed values are {}",
            allowed.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateUserRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let new_user = request(serde_json::json!({
            "email": " Maria@Empresa.com ",
            "full_name": "Maria Souza",
            "role": "coordenador",
            "permissions": [
                {"module_name": "DESPESAS", "level": "MANAGE"},
                {"module_name": "MATERIAIS", "level": "NONE"}
            ]
        }))
        .validate()
        .unwrap();

        assert_eq!(new_user.email, "maria@empresa.com");
        assert_eq!(new_user.role, Role::Coordinator);
        assert_eq!(new_user.grants.len(), 2);

        let rows = new_user.permission_rows("user-1");
        assert_eq!(
            rows,
            vec![UserPermissionRow {
                user_id: "user-1".to_string(),
                module_name: "DESPESAS",
                level: "MANAGE",
            }]
        );
    }

    #[test]
    fn test_missing_role_defaults_to_viewer() {
        let new_user = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "João Silva"
        }))
        .validate()
        .unwrap();
        assert_eq!(new_user.role, Role::Viewer);
        assert!(new_user.grants.is_empty());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "João Silva",
            "role": "user"
        }))
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            CreateUserError::UnknownRole {
                role: "user".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_emails_are_rejected() {
        for email in ["", "joao", "joao@", "@empresa.com", "jo ao@empresa.com", "a@b", "a@b@c.com"] {
            let result = request(serde_json::json!({
                "email": email,
                "full_name": "João"
            }))
            .validate();
            assert!(
                matches!(result, Err(CreateUserError::InvalidEmail { .. })),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_blank_full_name_is_rejected() {
        let result = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "   "
        }))
        .validate();
        assert_eq!(result, Err(CreateUserError::MissingFullName));
    }

    #[test]
    fn test_grant_errors() {
        let unknown_module = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "João",
            "permissions": [{"module_name": "FROTA", "level": "READ"}]
        }))
        .validate();
        assert_eq!(
            unknown_module,
            Err(CreateUserError::UnknownModule {
                module: "FROTA".to_string()
            })
        );

        let unknown_level = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "João",
            "permissions": [{"module_name": "DESPESAS", "level": "OWNER"}]
        }))
        .validate();
        assert!(matches!(
            unknown_level,
            Err(CreateUserError::UnknownAccessLevel { .. })
        ));

        let duplicate = request(serde_json::json!({
            "email": "joao@empresa.com",
            "full_name": "João",
            "permissions": [
                {"module_name": "DESPESAS", "level": "READ"},
                {"module_name": "expenses", "level": "WRITE"}
            ]
        }))
        .validate();
        assert_eq!(
            duplicate,
            Err(CreateUserError::DuplicateGrant {
                module: Module::Expenses
            })
        );
    }

    #[test]
    fn test_error_serializes_with_code() {
        let json = serde_json::to_value(CreateUserError::UnknownRole {
            role: "user".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"code": "unknown_role", "role": "user"}));
    }

    #[test]
    fn test_parse_permission_arg() {
        assert_eq!(
            parse_permission_arg("transfer_assets"),
            Ok(Permission::TransferAssets)
        );
        assert!(parse_permission_arg("fly").unwrap_err().contains("view_finance"));
    }
}
