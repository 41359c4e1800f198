use crate::utils::ui::Ui;
use starmkt_core::authorization::{Authorizer, RoleResolver};

/// AppContext provides access to shared application resources
pub struct AppContext {
    /// Authorizer built from the loaded policy
    pub authorizer: Authorizer,
    /// UI instance for managing terminal output
    pub ui: Ui,
    /// Render results as JSON instead of tables
    pub json: bool,
}

impl AppContext {
    pub fn new(authorizer: Authorizer, json: bool) -> Self {
        AppContext {
            authorizer,
            ui: Ui::new(json),
            json,
        }
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    pub fn roles(&self) -> &RoleResolver {
        self.authorizer.roles()
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }
}
