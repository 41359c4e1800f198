use starmkt_types::{Module, ModuleGrant, Role};

use super::{is_under, NavItem};
use crate::authorization::module_access::has_any_access;

const MODULE_ITEMS: [(Module, NavItem); 3] = [
    (Module::Expenses, NavItem::main("Despesas", "/despesas")),
    (Module::Invoices, NavItem::main("Notas Fiscais", "/notas")),
    (Module::Materials, NavItem::main("Materiais", "/materiais")),
];

const REPORTS: NavItem = NavItem::main("Meus Relatórios", "/relatorios");

const ADMIN_ITEMS: [NavItem; 2] = [
    NavItem::admin("Usuários", "/admin/usuarios"),
    NavItem::admin("Aprovação", "/admin/relatorios"),
];

/// Sidebar of the Reembolsos portal.
///
/// Module links follow the actor's grants, "Meus Relatórios" is always
/// present and the administration section needs the `admin` role.
pub fn sidebar(role: Option<Role>, grants: &[ModuleGrant]) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = MODULE_ITEMS
        .iter()
        .filter(|(module, _)| has_any_access(grants, *module))
        .map(|(_, item)| *item)
        .collect();

    items.push(REPORTS);

    if role == Some(Role::Admin) {
        items.extend(ADMIN_ITEMS);
    }

    items
}

/// Sidebar entry covering `path`, if the actor can see one
pub fn entry_for(path: &str, role: Option<Role>, grants: &[ModuleGrant]) -> Option<NavItem> {
    sidebar(role, grants)
        .into_iter()
        .find(|item| is_under(path, item.path))
}

/// Route guard matching the sidebar; unlisted paths are denied
pub fn can_open(path: &str, role: Option<Role>, grants: &[ModuleGrant]) -> bool {
    entry_for(path, role, grants).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavSection;
    use starmkt_types::AccessLevel;

    fn paths(items: &[NavItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.path).collect()
    }

    #[test]
    fn test_no_grants_only_shows_reports() {
        let items = sidebar(None, &[]);
        assert_eq!(paths(&items), vec!["/relatorios"]);
    }

    #[test]
    fn test_grants_drive_module_links() {
        let grants = [
            ModuleGrant::new(Module::Expenses, AccessLevel::Manage),
            ModuleGrant::new(Module::Invoices, AccessLevel::None),
            ModuleGrant::new(Module::Materials, AccessLevel::Read),
        ];
        let items = sidebar(Some(Role::Viewer), &grants);
        assert_eq!(paths(&items), vec!["/despesas", "/materiais", "/relatorios"]);
        assert!(items.iter().all(|item| item.section == NavSection::Main));
    }

    #[test]
    fn test_admin_section_requires_admin_role() {
        let items = sidebar(Some(Role::Admin), &[]);
        assert_eq!(
            paths(&items),
            vec!["/relatorios", "/admin/usuarios", "/admin/relatorios"]
        );

        let items = sidebar(Some(Role::Finance), &[]);
        assert!(items.iter().all(|item| item.section != NavSection::Admin));
    }

    #[test]
    fn test_route_guard() {
        let grants = [ModuleGrant::new(Module::Invoices, AccessLevel::Write)];
        assert!(can_open("/notas/42", None, &grants));
        assert!(!can_open("/despesas", None, &grants));
        assert!(!can_open("/admin/usuarios", Some(Role::Finance), &grants));
        assert!(can_open("/admin/usuarios", Some(Role::Admin), &grants));
        assert!(!can_open("/unknown", Some(Role::Admin), &grants));
    }

    #[test]
    fn test_entry_for_nested_path() {
        let grants = [ModuleGrant::new(Module::Expenses, AccessLevel::Read)];
        assert_eq!(
            entry_for("/despesas/7/editar", None, &grants).map(|item| item.label),
            Some("Despesas")
        );
        assert!(entry_for("/materiais", None, &grants).is_none());
    }
}
