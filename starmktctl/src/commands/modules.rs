use serde::Serialize;
use starmkt_core::admin::TestModuleAccessRequest;
use starmkt_core::authorization::{level_for, Capabilities, Capability, CapabilityResolver};
use starmkt_types::{AccessLevel, Module};
use tabled::{builder::Builder, settings::Style};

use crate::{
    context::AppContext,
    utils::formatting::{colored_level, to_json, yes_no},
};

#[derive(Debug, Serialize)]
pub struct ModuleAccessResult {
    pub module: Module,
    pub held: AccessLevel,
    pub required: AccessLevel,
    pub allowed: bool,
    pub reason: Option<String>,
}

pub fn test_module_access(
    context: &AppContext,
    cmd: &TestModuleAccessRequest,
) -> anyhow::Result<String> {
    let decision = context.authorizer().decide(
        &Capabilities::grants(cmd.grants.clone()),
        &Capability::module(cmd.module, cmd.level),
    );

    let result = ModuleAccessResult {
        module: cmd.module,
        held: level_for(&cmd.grants, cmd.module),
        required: cmd.level,
        allowed: decision.is_allowed(),
        reason: decision.reason().map(|reason| reason.to_string()),
    };

    if context.json {
        return to_json(&result);
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["Module", "Held", "Required", "Allowed"]);
    builder.push_record(vec![
        format!("{} ({})", result.module.as_str(), result.module.datastore_name()),
        colored_level(result.held),
        colored_level(result.required),
        yes_no(result.allowed),
    ]);

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}
