use owo_colors::OwoColorize;
use serde::Serialize;
use starmkt_core::navigation::{
    reembolsos,
    starmkt::{self, RouteRequirement},
    App, NavItem, NavSection,
};
use tabled::{builder::Builder, settings::Style};

use crate::{
    cli::{NavShowCommand, RouteTestCommand},
    context::AppContext,
    utils::formatting::{to_json, yes_no},
};

fn menu_for(context: &AppContext, actor: &NavShowCommand) -> Vec<NavItem> {
    match actor.app {
        App::Reembolsos => reembolsos::sidebar(actor.role, &actor.grants),
        App::Starmkt => actor
            .role
            .map(|role| starmkt::menu(context.roles(), role))
            .unwrap_or_default(),
    }
}

pub fn show_nav(context: &AppContext, cmd: &NavShowCommand) -> anyhow::Result<String> {
    let items = menu_for(context, cmd);

    if context.json {
        return to_json(&items);
    }

    if items.is_empty() {
        return Ok("No menu entries.".to_string());
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Section", "Label", "Path"]);
    for item in &items {
        let section = match item.section {
            NavSection::Main => "main".to_string(),
            NavSection::Admin => "admin".yellow().to_string(),
        };
        builder.push_record(vec![section, item.label.to_string(), item.path.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}

#[derive(Debug, Serialize)]
pub struct RouteTestResult {
    pub app: App,
    pub path: String,
    pub allowed: bool,
    /// Route the path resolved to, if any
    pub route: Option<&'static str>,
    pub requirement: Option<String>,
}

fn describe_requirement(requirement: &RouteRequirement) -> String {
    match requirement {
        RouteRequirement::Permission(permission) => permission.as_str().to_string(),
        RouteRequirement::AnyOf(permissions) => permissions
            .iter()
            .map(|permission| permission.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
        RouteRequirement::AdminRole => "role admin".to_string(),
    }
}

pub fn test_route(context: &AppContext, cmd: &RouteTestCommand) -> anyhow::Result<String> {
    let actor = &cmd.actor;
    let result = match actor.app {
        App::Reembolsos => {
            let entry = reembolsos::entry_for(&cmd.path, actor.role, &actor.grants);
            RouteTestResult {
                app: actor.app,
                path: cmd.path.clone(),
                allowed: entry.is_some(),
                route: entry.map(|item| item.path),
                requirement: None,
            }
        }
        App::Starmkt => {
            let route = starmkt::route_for(&cmd.path);
            RouteTestResult {
                app: actor.app,
                path: cmd.path.clone(),
                allowed: actor
                    .role
                    .is_some_and(|role| starmkt::can_open(context.roles(), role, &cmd.path)),
                route: route.map(|route| route.item.path),
                requirement: route.map(|route| describe_requirement(&route.requirement)),
            }
        }
    };

    if context.json {
        return to_json(&result);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Path", "Route", "Requires", "Allowed"]);
    builder.push_record(vec![
        result.path.bright_blue().to_string(),
        result.route.unwrap_or("-").to_string(),
        result.requirement.clone().unwrap_or_else(|| "-".to_string()),
        yes_no(result.allowed),
    ]);

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}
