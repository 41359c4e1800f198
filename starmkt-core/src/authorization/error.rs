use starmkt_types::Role;

/// Errors raised while building a permission table.
///
/// Only configuration paths return these. Decisions never fail; unknown
/// input always resolves to a denial.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Policy references a role outside the closed role set
    #[error("Unknown role '{0}' in authorization policy")]
    UnknownRole(String),

    /// Every role needs an entry, even if the caller only uses a few
    #[error("Role '{0}' has no entry in the authorization policy")]
    MissingRole(Role),

    /// Two keys, e.g. `legal` and `juridico`, name the same role
    #[error("Role '{0}' is configured more than once")]
    DuplicateRole(Role),

    #[error("Role '{0}' must hold at least one permission")]
    EmptyRole(Role),

    /// The admin role must hold every permission any other role holds
    #[error("Role 'admin' is missing permissions granted to '{role}': {missing}")]
    AdminNotSuperset { role: Role, missing: String },
}
