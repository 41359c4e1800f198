mod cli;
mod commands;
mod context;
mod utils;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::print_completions;
use cli::{Cli, Commands};
use context::AppContext;
use starmkt_core::settings::Settings;
use tracing::info;
use tracing_subscriber::prelude::*;
use utils::logging::log_filter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Completion(cmd) = &cli.command {
        let mut cli_cmd = Cli::command();
        print_completions(cmd.shell, &mut cli_cmd);
        return Ok(());
    }

    let settings = Settings::from_dir(&cli.config_dir).with_context(|| {
        format!("Failed to load settings from {}", cli.config_dir.display())
    })?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.debug || settings.debug))
        .init();

    let authorizer = settings
        .authorizer()
        .context("Invalid authorization policy")?;

    let app_context = AppContext::new(authorizer, cli.json);
    info!("Running command {:?} ...", &cli.command);

    let ui = app_context.ui();
    match &cli.command {
        Commands::RolesList => ui.run(|| commands::roles::list_roles(&app_context)),
        Commands::RolesShow(cmd) => ui.run(|| commands::roles::show_role(&app_context, cmd)),
        Commands::PermissionsList => {
            ui.run(|| commands::permissions::list_permissions(&app_context))
        }
        Commands::PermissionsTest(cmd) => {
            ui.run(|| commands::permissions::test_permission(&app_context, cmd))
        }
        Commands::PermissionsHolders(cmd) => {
            ui.run(|| commands::permissions::permission_holders(&app_context, cmd))
        }
        Commands::ModulesTest(cmd) => {
            ui.run(|| commands::modules::test_module_access(&app_context, cmd))
        }
        Commands::NavShow(cmd) => ui.run(|| commands::navigation::show_nav(&app_context, cmd)),
        Commands::RouteTest(cmd) => {
            ui.run(|| commands::navigation::test_route(&app_context, cmd))
        }
        Commands::UserValidate(cmd) => {
            ui.run(|| commands::users::validate_user(&app_context, cmd))
        }
        Commands::Completion(_) => Ok(()),
    }
}
