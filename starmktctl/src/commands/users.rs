use owo_colors::OwoColorize;
use starmkt_core::admin::{CreateUserRequest, CreateUserResponse};
use tabled::{builder::Builder, settings::Style};
use tracing::info;

use crate::{
    cli::UserValidateCommand,
    context::AppContext,
    utils::{formatting::to_json, parsers::read_payload_file},
};

/// Placeholder id shown for rows of a user that does not exist yet
const PENDING_USER_ID: &str = "<new>";

/// Validate a create-user payload.
///
/// With `--json` a rejected payload is printed in the same
/// `{"status": "rejected", ...}` shape the create-user function returns.
pub fn validate_user(context: &AppContext, cmd: &UserValidateCommand) -> anyhow::Result<String> {
    let request: CreateUserRequest = read_payload_file(&cmd.file)?;
    info!("Validating create-user payload for '{}'", request.email);

    let new_user = match request.validate() {
        Ok(new_user) => new_user,
        Err(error) if context.json => {
            return to_json(&CreateUserResponse::Rejected { error });
        }
        Err(error) => {
            return Err(anyhow::Error::new(error).context(format!(
                "Payload {} was rejected",
                cmd.file.display()
            )));
        }
    };

    if context.json {
        return to_json(&new_user);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["user_id", "module_name", "level"]);
    for row in new_user.permission_rows(PENDING_USER_ID) {
        builder.push_record(vec![row.user_id, row.module_name.to_string(), row.level.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    context.ui().success(format!(
        "Payload for '{}' is valid.",
        new_user.email.bright_green()
    ));
    Ok(format!(
        "{} <{}>, role: {} ({})\n{}",
        new_user.full_name,
        new_user.email,
        new_user.role.as_str().bright_blue(),
        new_user.role.label(),
        table
    ))
}
