//! Menu and route-guard projections of authorization decisions.
//!
//! The UIs render exactly the entries returned here; nothing in this module
//! grants access on its own.

pub mod reembolsos;
pub mod starmkt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    Main,
    Admin,
}

/// One link in a sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub section: NavSection,
}

impl NavItem {
    pub const fn main(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            path,
            section: NavSection::Main,
        }
    }

    pub const fn admin(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            path,
            section: NavSection::Admin,
        }
    }
}

/// Which back office a menu is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum App {
    #[default]
    Reembolsos,
    Starmkt,
}

/// True when `path` is `prefix` or lies below it
pub(crate) fn is_under(path: &str, prefix: &str) -> bool {
    let path = path.trim_end_matches('/');
    let prefix = prefix.trim_end_matches('/');
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_under() {
        assert!(is_under("/financeiro", "/financeiro"));
        assert!(is_under("/financeiro/", "/financeiro"));
        assert!(is_under("/financeiro/pagamentos", "/financeiro"));
        assert!(!is_under("/financeiros", "/financeiro"));
        assert!(!is_under("/admin", "/admin/usuarios"));
    }
}
