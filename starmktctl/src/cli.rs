use crate::utils::parsers::{parse_role_arg, parse_route_path};
use clap::{Command, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use starmkt_core::{
    admin::{
        parse_permission_arg, RolePermissionsRequest, TestModuleAccessRequest,
        TestPermissionRequest,
    },
    authorization::module_access::parse_grant_arg,
    navigation::App,
};
use starmkt_types::{ModuleGrant, Permission, Role};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "starmktctl")]
#[command(about = "Inspect and test the StarMKT authorization policy")]
#[command(version)]
pub struct Cli {
    /// Folder holding default.yaml, {run_mode}.yaml and local.yaml
    #[arg(long, env = "STARMKT_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Print results as JSON instead of tables
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[arg(long, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all roles with their labels and permissions
    #[command(name = "roles:list")]
    RolesList,

    /// Show the permissions of a single role
    #[command(name = "roles:show")]
    RolesShow(RolePermissionsRequest),

    /// Show the role x permission matrix
    #[command(name = "permissions:list")]
    PermissionsList,

    /// Test whether a role holds a permission
    #[command(name = "permissions:test")]
    PermissionsTest(TestPermissionRequest),

    /// List the roles holding a permission
    #[command(name = "permissions:holders")]
    PermissionsHolders(PermissionHoldersCommand),

    /// Test module access for a set of grants
    #[command(name = "modules:test")]
    ModulesTest(TestModuleAccessRequest),

    /// Show the menu a role or set of grants would see
    #[command(name = "nav:show")]
    NavShow(NavShowCommand),

    /// Test whether a route may be opened
    #[command(name = "route:test")]
    RouteTest(RouteTestCommand),

    /// Validate a create-user payload (JSON or YAML)
    #[command(name = "user:validate")]
    UserValidate(UserValidateCommand),

    /// Generate completion script for a specific shell
    #[command(name = "completion")]
    Completion(CompletionCommand),
}

#[derive(Debug, Parser)]
pub struct CompletionCommand {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Parser)]
pub struct PermissionHoldersCommand {
    /// Permission to look up (e.g. approve_reimbursements)
    #[arg(value_parser = parse_permission_arg)]
    pub permission: Permission,
}

#[derive(Debug, Parser)]
pub struct NavShowCommand {
    /// Role of the signed-in user
    #[arg(long, value_parser = parse_role_arg)]
    pub role: Option<Role>,

    /// Module grants held by the user, as MODULE=LEVEL (repeatable)
    #[arg(long = "grant", value_parser = parse_grant_arg, value_name = "MODULE=LEVEL")]
    pub grants: Vec<ModuleGrant>,

    /// Back office to build the menu for
    #[arg(long, value_enum, default_value_t = App::Reembolsos)]
    pub app: App,
}

#[derive(Debug, Parser)]
pub struct RouteTestCommand {
    /// Path to test (e.g. /financeiro/reembolsos)
    #[arg(value_parser = parse_route_path)]
    pub path: String,

    #[command(flatten)]
    pub actor: NavShowCommand,
}

#[derive(Debug, Parser)]
pub struct UserValidateCommand {
    /// Path to the payload file
    pub file: PathBuf,
}

pub fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut std::io::stdout());
}
