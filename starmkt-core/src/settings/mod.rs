pub mod config;
pub mod policy;

pub use self::config::Settings;
pub use self::policy::PolicySettings;
