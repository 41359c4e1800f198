use serde::Serialize;
use starmkt_types::{Permission, Role};
use tracing::debug;

use super::{is_under, NavItem};
use crate::authorization::RoleResolver;

/// Permissions that let a role take part in the reimbursement pipeline
const REIMBURSEMENT_APPROVERS: &[Permission] = &[
    Permission::ApproveLocalReimbursements,
    Permission::ApproveReimbursements,
    Permission::ReviewReimbursements,
];

const REIMBURSEMENT_PARTICIPANTS: &[Permission] = &[
    Permission::CreateReimbursement,
    Permission::ApproveLocalReimbursements,
    Permission::ApproveReimbursements,
    Permission::ReviewReimbursements,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RouteRequirement {
    Permission(Permission),
    AnyOf(&'static [Permission]),
    AdminRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub item: NavItem,
    pub requirement: RouteRequirement,
}

const ROUTES: &[Route] = &[
    Route {
        item: NavItem::main("Dashboard", "/dashboard"),
        requirement: RouteRequirement::Permission(Permission::ViewDashboards),
    },
    Route {
        item: NavItem::main("Financeiro", "/financeiro"),
        requirement: RouteRequirement::Permission(Permission::ViewFinance),
    },
    Route {
        item: NavItem::main("Reembolsos", "/financeiro/reembolsos"),
        requirement: RouteRequirement::AnyOf(REIMBURSEMENT_PARTICIPANTS),
    },
    Route {
        item: NavItem::main("Aprovações", "/financeiro/reembolsos/aprovacoes"),
        requirement: RouteRequirement::AnyOf(REIMBURSEMENT_APPROVERS),
    },
    Route {
        item: NavItem::main("Patrimônio", "/patrimonio"),
        requirement: RouteRequirement::Permission(Permission::ViewAssets),
    },
    Route {
        item: NavItem::main("Contratos", "/contratos"),
        requirement: RouteRequirement::Permission(Permission::ViewFinance),
    },
    Route {
        item: NavItem::main("Prestadores", "/prestadores"),
        requirement: RouteRequirement::Permission(Permission::ViewFinance),
    },
    Route {
        item: NavItem::admin("Usuários", "/admin/usuarios"),
        requirement: RouteRequirement::AdminRole,
    },
];

pub fn routes() -> &'static [Route] {
    ROUTES
}

/// Most specific route covering `path`
pub fn route_for(path: &str) -> Option<&'static Route> {
    ROUTES
        .iter()
        .filter(|route| is_under(path, route.item.path))
        .max_by_key(|route| route.item.path.len())
}

pub fn satisfies(roles: &RoleResolver, role: Role, requirement: &RouteRequirement) -> bool {
    match requirement {
        RouteRequirement::Permission(permission) => roles.has_permission(role, *permission),
        RouteRequirement::AnyOf(permissions) => permissions
            .iter()
            .any(|permission| roles.has_permission(role, *permission)),
        RouteRequirement::AdminRole => role == Role::Admin,
    }
}

/// Route guard for StarMKT OS. Paths without a route are denied; public
/// pages such as `/login` are handled before the guard runs.
pub fn can_open(roles: &RoleResolver, role: Role, path: &str) -> bool {
    let allowed = route_for(path).is_some_and(|route| satisfies(roles, role, &route.requirement));
    debug!("Route guard: role='{}', path='{}', allowed={}", role, path, allowed);
    allowed
}

/// Menu entries the role may open, in declaration order
pub fn menu(roles: &RoleResolver, role: Role) -> Vec<NavItem> {
    ROUTES
        .iter()
        .filter(|route| satisfies(roles, role, &route.requirement))
        .map(|route| route.item)
        .collect()
}
