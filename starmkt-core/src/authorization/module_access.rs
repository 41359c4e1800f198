//! Module/access-level scheme used by the Reembolsos portal.
//!
//! Grants are stored per actor and never derived from the role. A module
//! without a grant behaves exactly like an explicit `none` grant.

use serde::{Deserialize, Serialize};
use starmkt_types::{AccessLevel, Module, ModuleGrant};
use tracing::warn;

/// Row of the `user_permissions` table as it comes back from the datastore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRow {
    pub module_name: String,
    pub level: String,
}

/// True iff some grant targets `module` with a level above `none`
pub fn has_any_access(grants: &[ModuleGrant], module: Module) -> bool {
    grants
        .iter()
        .any(|grant| grant.module == module && grant.level.grants_access())
}

/// Highest level granted for `module`, `none` when there is no grant
pub fn level_for(grants: &[ModuleGrant], module: Module) -> AccessLevel {
    grants
        .iter()
        .filter(|grant| grant.module == module)
        .map(|grant| grant.level)
        .max()
        .unwrap_or_default()
}

pub fn can_write(level: AccessLevel) -> bool {
    level.can_write()
}

pub fn can_manage(level: AccessLevel) -> bool {
    level.can_manage()
}

/// Convert datastore rows into grants.
///
/// Rows naming an unknown module are dropped and unknown levels are lowered
/// to `none`, so a malformed row can only ever remove access.
pub fn grants_from_rows(rows: &[GrantRow]) -> Vec<ModuleGrant> {
    rows.iter()
        .filter_map(|row| {
            let Some(module) = Module::from_str(&row.module_name) else {
                warn!("Ignoring grant for unknown module '{}'", row.module_name);
                return None;
            };
            let level = AccessLevel::from_str(&row.level).unwrap_or_else(|| {
                warn!(
                    "Unknown access level '{}' for module '{}', treating as none",
                    row.level, module
                );
                AccessLevel::None
            });
            Some(ModuleGrant::new(module, level))
        })
        .collect()
}

/// Parse `module=level` (e.g. `expenses=write`, `DESPESAS=MANAGE`)
pub fn parse_grant_arg(s: &str) -> Result<ModuleGrant, String> {
    let (module, level) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid grant '{s}', expected MODULE=LEVEL"))?;

    let module = Module::from_str(module).ok_or_else(|| {
        format!("Unknown module '{module}', allowed values are expenses, invoices and materials")
    })?;
    let level = AccessLevel::from_str(level).ok_or_else(|| {
        format!("Unknown access level '{level}', allowed values are none, read, write and manage")
    })?;

    Ok(ModuleGrant::new(module, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grants_deny_everything() {
        for module in Module::all() {
            assert!(!has_any_access(&[], module));
            assert_eq!(level_for(&[], module), AccessLevel::None);
        }
    }

    #[test]
    fn test_read_grant_opens_module() {
        let grants = [ModuleGrant::new(Module::Expenses, AccessLevel::Read)];
        assert!(has_any_access(&grants, Module::Expenses));
        assert!(!has_any_access(&grants, Module::Invoices));
    }

    #[test]
    fn test_none_grant_is_same_as_absent() {
        let grants = [ModuleGrant::new(Module::Expenses, AccessLevel::None)];
        assert!(!has_any_access(&grants, Module::Expenses));
        assert_eq!(level_for(&grants, Module::Expenses), AccessLevel::None);
    }

    #[test]
    fn test_duplicate_grants_resolve_to_highest() {
        let grants = [
            ModuleGrant::new(Module::Materials, AccessLevel::Manage),
            ModuleGrant::new(Module::Materials, AccessLevel::Read),
            ModuleGrant::new(Module::Invoices, AccessLevel::Write),
        ];
        assert_eq!(level_for(&grants, Module::Materials), AccessLevel::Manage);
        assert_eq!(level_for(&grants, Module::Invoices), AccessLevel::Write);
    }

    #[test]
    fn test_write_and_manage_predicates() {
        assert!(can_write(AccessLevel::Manage));
        assert!(can_write(AccessLevel::Write));
        assert!(!can_write(AccessLevel::Read));
        assert!(!can_write(AccessLevel::None));

        assert!(can_manage(AccessLevel::Manage));
        assert!(!can_manage(AccessLevel::Write));
        assert!(!can_manage(AccessLevel::Read));
        assert!(!can_manage(AccessLevel::None));
    }

    #[test]
    fn test_grants_from_rows_fails_closed() {
        let rows = vec![
            GrantRow {
                module_name: "DESPESAS".to_string(),
                level: "MANAGE".to_string(),
            },
            GrantRow {
                module_name: "FROTA".to_string(),
                level: "WRITE".to_string(),
            },
            GrantRow {
                module_name: "MATERIAIS".to_string(),
                level: "SUPER".to_string(),
            },
        ];

        let grants = grants_from_rows(&rows);
        assert_eq!(
            grants,
            vec![
                ModuleGrant::new(Module::Expenses, AccessLevel::Manage),
                ModuleGrant::new(Module::Materials, AccessLevel::None),
            ]
        );
        assert!(!has_any_access(&grants, Module::Materials));
    }

    #[test]
    fn test_parse_grant_arg() {
        assert_eq!(
            parse_grant_arg("invoices=write"),
            Ok(ModuleGrant::new(Module::Invoices, AccessLevel::Write))
        );
        assert_eq!(
            parse_grant_arg("NOTAS_FISCAIS=READ"),
            Ok(ModuleGrant::new(Module::Invoices, AccessLevel::Read))
        );
        assert!(parse_grant_arg("invoices").is_err());
        assert!(parse_grant_arg("fleet=read").unwrap_err().contains("Unknown module"));
        assert!(parse_grant_arg("invoices=owner")
            .unwrap_err()
            .contains("Unknown access level"));
    }
}
