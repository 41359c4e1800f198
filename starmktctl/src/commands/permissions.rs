use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use serde::Serialize;
use starmkt_core::admin::{TestPermissionRequest, TestPermissionResponse};
use starmkt_core::authorization::{Capabilities, Capability, CapabilityResolver};
use starmkt_types::{Permission, Role};
use tabled::{builder::Builder, settings::Style};

use crate::{
    cli::PermissionHoldersCommand,
    context::AppContext,
    utils::formatting::{to_json, yes_no},
};

/// Role x permission matrix
pub fn list_permissions(context: &AppContext) -> anyhow::Result<String> {
    let roles = context.roles();

    if context.json {
        let matrix: BTreeMap<&str, Vec<Permission>> = Role::all()
            .into_iter()
            .map(|role| (role.as_str(), roles.permissions_for(role)))
            .collect();
        return to_json(&matrix);
    }

    let mut builder = Builder::default();
    let mut header = vec!["Permission".to_string()];
    header.extend(Role::all().iter().map(|role| role.as_str().to_string()));
    builder.push_record(header);

    for permission in Permission::all() {
        let mut row = vec![permission.as_str().to_string()];
        row.extend(Role::all().into_iter().map(|role| {
            if roles.has_permission(role, permission) {
                "✓".green().to_string()
            } else {
                String::new()
            }
        }));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}

pub fn test_permission(
    context: &AppContext,
    cmd: &TestPermissionRequest,
) -> anyhow::Result<String> {
    let allowed = context.roles().has_permission_str(&cmd.role, &cmd.permission);

    let reason = match (Role::from_str(&cmd.role), Permission::from_str(&cmd.permission)) {
        (None, _) => Some(format!("unknown role '{}'", cmd.role)),
        (_, None) => Some(format!("unknown permission '{}'", cmd.permission)),
        (Some(role), Some(permission)) => context
            .authorizer()
            .decide(
                &Capabilities::role(role),
                &Capability::permission(permission),
            )
            .reason()
            .map(|reason| reason.to_string()),
    };

    let response = TestPermissionResponse {
        role: cmd.role.clone(),
        permission: cmd.permission.clone(),
        allowed,
        reason,
    };

    if context.json {
        return to_json(&response);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Role", "Permission", "Allowed", "Reason"]);
    builder.push_record(vec![
        response.role.clone(),
        response.permission.clone(),
        yes_no(response.allowed),
        response.reason.clone().unwrap_or_default(),
    ]);

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}

#[derive(Debug, Serialize)]
pub struct PermissionHolders {
    pub permission: Permission,
    pub roles: Vec<Role>,
}

pub fn permission_holders(
    context: &AppContext,
    cmd: &PermissionHoldersCommand,
) -> anyhow::Result<String> {
    let holders = PermissionHolders {
        permission: cmd.permission,
        roles: context.roles().roles_with(cmd.permission),
    };

    if context.json {
        return to_json(&holders);
    }

    if holders.roles.is_empty() {
        return Ok(format!("No role holds '{}'.", holders.permission));
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Role", "Label"]);
    for role in &holders.roles {
        builder.push_record(vec![role.as_str(), role.label()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(format!(
        "Roles holding {}:\n{}",
        holders.permission.as_str().bright_blue(),
        table
    ))
}
