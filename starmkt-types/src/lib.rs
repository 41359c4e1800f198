/*!
 * Authorization domain types shared by the StarMKT back office
 *
 * This crate only holds the closed enumerations and plain records that the
 * web front ends consume, so TypeScript bindings can be generated without
 * compiling the policy engine in starmkt-core.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// Re-export for the generator binary
pub use ts_rs;

/// Role assigned to an actor at account creation
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Admin,
    Finance,
    #[serde(alias = "juridico")]
    Legal,
    #[serde(alias = "hub")]
    HubManager,
    Viewer,
    #[serde(alias = "coordenador")]
    Coordinator,
}

impl Role {
    /// Get all roles in display order
    pub fn all() -> Vec<Role> {
        vec![
            Role::Admin,
            Role::Finance,
            Role::Legal,
            Role::Coordinator,
            Role::HubManager,
            Role::Viewer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Finance => "finance",
            Role::Legal => "legal",
            Role::HubManager => "hub_manager",
            Role::Viewer => "viewer",
            Role::Coordinator => "coordinator",
        }
    }

    /// Human readable label shown in the admin screens
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Finance => "Financeiro",
            Role::Legal => "Jurídico",
            Role::HubManager => "Gestor de Hub",
            Role::Viewer => "Visualizador",
            Role::Coordinator => "Coordenador de HUB",
        }
    }

    /// Parse from string, accepting the legacy spellings stored in profiles
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "finance" => Some(Role::Finance),
            "legal" | "juridico" => Some(Role::Legal),
            "hub_manager" | "hub" => Some(Role::HubManager),
            "viewer" => Some(Role::Viewer),
            "coordinator" | "coordenador" => Some(Role::Coordinator),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained capability held through a role
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Permission {
    ViewFinance,
    /// Finance-stage approval of reimbursements
    ApproveReimbursements,
    /// Legal-stage review of reimbursements
    ReviewReimbursements,
    /// Hub-level approval by the coordinator
    ApproveLocalReimbursements,
    ViewAssets,
    TransferAssets,
    CreateReimbursement,
    ViewDashboards,
}

impl Permission {
    /// Get all available permissions in display order
    pub fn all() -> Vec<Permission> {
        vec![
            Permission::ViewFinance,
            Permission::ApproveReimbursements,
            Permission::ReviewReimbursements,
            Permission::ApproveLocalReimbursements,
            Permission::ViewAssets,
            Permission::TransferAssets,
            Permission::CreateReimbursement,
            Permission::ViewDashboards,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewFinance => "view_finance",
            Permission::ApproveReimbursements => "approve_reimbursements",
            Permission::ReviewReimbursements => "review_reimbursements",
            Permission::ApproveLocalReimbursements => "approve_local_reimbursements",
            Permission::ViewAssets => "view_assets",
            Permission::TransferAssets => "transfer_assets",
            Permission::CreateReimbursement => "create_reimbursement",
            Permission::ViewDashboards => "view_dashboards",
        }
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Permission> {
        match s.trim().to_lowercase().as_str() {
            "view_finance" => Some(Permission::ViewFinance),
            "approve_reimbursements" => Some(Permission::ApproveReimbursements),
            "review_reimbursements" => Some(Permission::ReviewReimbursements),
            "approve_local_reimbursements" => Some(Permission::ApproveLocalReimbursements),
            "view_assets" => Some(Permission::ViewAssets),
            "transfer_assets" => Some(Permission::TransferAssets),
            "create_reimbursement" => Some(Permission::CreateReimbursement),
            "view_dashboards" => Some(Permission::ViewDashboards),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Functional area of the Reembolsos portal
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Module {
    #[serde(alias = "DESPESAS")]
    Expenses,
    #[serde(alias = "NOTAS_FISCAIS")]
    Invoices,
    #[serde(alias = "MATERIAIS")]
    Materials,
}

impl Module {
    pub fn all() -> Vec<Module> {
        vec![Module::Expenses, Module::Invoices, Module::Materials]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Expenses => "expenses",
            Module::Invoices => "invoices",
            Module::Materials => "materials",
        }
    }

    /// Name used by the `user_permissions.module_name` column
    pub fn datastore_name(&self) -> &'static str {
        match self {
            Module::Expenses => "DESPESAS",
            Module::Invoices => "NOTAS_FISCAIS",
            Module::Materials => "MATERIAIS",
        }
    }

    /// Parse from string, accepting the datastore names (`DESPESAS`, ...)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Module> {
        match s.trim().to_lowercase().as_str() {
            "expenses" | "despesas" => Some(Module::Expenses),
            "invoices" | "notas_fiscais" => Some(Module::Invoices),
            "materials" | "materiais" => Some(Module::Materials),
            _ => None,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access level inside one module, ordered `None < Read < Write < Manage`
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AccessLevel {
    #[default]
    #[serde(alias = "NONE")]
    None,
    #[serde(alias = "READ")]
    Read,
    #[serde(alias = "WRITE")]
    Write,
    #[serde(alias = "MANAGE")]
    Manage,
}

impl AccessLevel {
    pub fn all() -> Vec<AccessLevel> {
        vec![
            AccessLevel::None,
            AccessLevel::Read,
            AccessLevel::Write,
            AccessLevel::Manage,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::None => "none",
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Manage => "manage",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<AccessLevel> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(AccessLevel::None),
            "read" => Some(AccessLevel::Read),
            "write" => Some(AccessLevel::Write),
            "manage" => Some(AccessLevel::Manage),
            _ => None,
        }
    }

    /// Anything above `None` opens the module
    pub fn grants_access(&self) -> bool {
        *self > AccessLevel::None
    }

    pub fn can_write(&self) -> bool {
        *self >= AccessLevel::Write
    }

    pub fn can_manage(&self) -> bool {
        *self == AccessLevel::Manage
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-actor access level for one module, independent of the role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export)]
pub struct ModuleGrant {
    #[serde(alias = "module_name")]
    pub module: Module,
    pub level: AccessLevel,
}

impl ModuleGrant {
    pub fn new(module: Module, level: AccessLevel) -> Self {
        Self { module, level }
    }
}

/// Coarse read/write mode used where no finer permission exists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AccessMode {
    Read,
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => write!(f, "read"),
            AccessMode::Write => write!(f, "write"),
        }
    }
}
