use serde::{Deserialize, Serialize};
use starmkt_types::{AccessMode, Permission, Role};

use super::requests::CreateUserError;
use crate::authorization::RoleResolver;

/// Successful user creation as returned by the function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub message: String,
    pub user_id: String,
    pub initial_password: String,
}

/// Typed result of the create-user function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreateUserResponse {
    Created(CreatedUser),
    Rejected { error: CreateUserError },
}

impl CreateUserResponse {
    pub fn created(user_id: impl Into<String>, initial_password: impl Into<String>) -> Self {
        CreateUserResponse::Created(CreatedUser {
            message: "User created".to_string(),
            user_id: user_id.into(),
            initial_password: initial_password.into(),
        })
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateUserResponse::Created(_))
    }
}

impl From<Result<CreatedUser, CreateUserError>> for CreateUserResponse {
    fn from(result: Result<CreatedUser, CreateUserError>) -> Self {
        match result {
            Ok(user) => CreateUserResponse::Created(user),
            Err(error) => CreateUserResponse::Rejected { error },
        }
    }
}

/// Information about a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleInfo {
    pub name: Role,
    pub label: String,
    pub permissions: Vec<Permission>,
    pub access_mode: AccessMode,
    pub all_hubs: bool,
}

impl RoleInfo {
    pub fn describe(roles: &RoleResolver, role: Role) -> Self {
        Self {
            name: role,
            label: role.label().to_string(),
            permissions: roles.permissions_for(role),
            access_mode: roles.access_mode(role),
            all_hubs: roles.can_read_all_hubs(role),
        }
    }
}

/// Response for listing roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesListResponse {
    pub roles: Vec<RoleInfo>,
}

/// Response for permission test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPermissionResponse {
    pub role: String,
    pub permission: String,
    pub allowed: bool,
    pub reason: Option<String>,
}
