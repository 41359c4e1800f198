use owo_colors::OwoColorize;
use starmkt_core::admin::{RoleInfo, RolePermissionsRequest, RolesListResponse};
use starmkt_types::Role;
use tabled::{builder::Builder, settings::Style};

use crate::{
    context::AppContext,
    utils::formatting::{colored_mode, to_json, yes_no},
};

pub fn list_roles(context: &AppContext) -> anyhow::Result<String> {
    let response = RolesListResponse {
        roles: Role::all()
            .into_iter()
            .map(|role| RoleInfo::describe(context.roles(), role))
            .collect(),
    };

    if context.json {
        return to_json(&response);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Name", "Label", "Access", "All hubs", "Permissions"]);

    for role in &response.roles {
        let permissions = role
            .permissions
            .iter()
            .map(|permission| permission.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record(vec![
            role.name.as_str().to_string(),
            role.label.clone(),
            colored_mode(role.access_mode),
            yes_no(role.all_hubs),
            permissions,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    context.ui().success(format!("{} roles in policy", response.roles.len()));
    Ok(table.to_string())
}

pub fn show_role(context: &AppContext, cmd: &RolePermissionsRequest) -> anyhow::Result<String> {
    let role = Role::from_str(&cmd.role)
        .ok_or_else(|| anyhow::anyhow!("Unknown role '{}'", cmd.role))?;
    let info = RoleInfo::describe(context.roles(), role);

    if context.json {
        return to_json(&info);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Permission"]);
    for permission in &info.permissions {
        builder.push_record(vec![permission.as_str()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(format!(
        "{} ({}), access: {}, all hubs: {}\n{}",
        info.name.as_str().bright_blue(),
        info.label,
        colored_mode(info.access_mode),
        yes_no(info.all_hubs),
        table
    ))
}
