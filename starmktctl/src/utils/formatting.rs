use owo_colors::OwoColorize;
use starmkt_types::{AccessLevel, AccessMode};

pub fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

pub fn colored_level(level: AccessLevel) -> String {
    let name = level.as_str();
    match level {
        AccessLevel::None => name.dimmed().to_string(),
        AccessLevel::Read => name.blue().to_string(),
        AccessLevel::Write => name.green().to_string(),
        AccessLevel::Manage => name.bright_green().to_string(),
    }
}

pub fn colored_mode(mode: AccessMode) -> String {
    match mode {
        AccessMode::Read => "read".blue().to_string(),
        AccessMode::Write => "write".green().to_string(),
    }
}

/// Render a value as pretty JSON for `--json`
pub fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
