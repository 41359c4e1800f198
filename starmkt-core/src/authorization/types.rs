use serde::{Deserialize, Serialize};
use starmkt_types::Permission;

/// Represents either a specific permission or wildcard (*)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOrWildcard {
    Permission(Permission),
    Wildcard,
}

impl PermissionOrWildcard {
    /// Expand into concrete permissions
    pub fn expand(&self) -> Vec<Permission> {
        match self {
            PermissionOrWildcard::Permission(perm) => vec![*perm],
            PermissionOrWildcard::Wildcard => Permission::all(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionOrWildcard::Permission(perm) => perm.as_str(),
            PermissionOrWildcard::Wildcard => "*",
        }
    }
}

/// Role entry as written in the policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    #[serde(with = "permission_serde")]
    pub permissions: Vec<PermissionOrWildcard>,
    #[serde(default)]
    pub description: String,
}

/// Custom serde module for permission serialization
pub mod permission_serde {
    use super::{Permission, PermissionOrWildcard};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(perms: &[PermissionOrWildcard], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let strings: Vec<&str> = perms.iter().map(|p| p.as_str()).collect();
        strings.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<PermissionOrWildcard>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .into_iter()
            .map(|s| {
                if s.trim() == "*" {
                    Ok(PermissionOrWildcard::Wildcard)
                } else {
                    // Unknown names are rejected so a typo never widens a role
                    Permission::from_str(&s)
                        .map(PermissionOrWildcard::Permission)
                        .ok_or_else(|| D::Error::custom(format!("unknown permission '{s}'")))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_config_parses_wildcard_and_names() {
        let config: RoleConfig = serde_json::from_str(
            r#"{"permissions": ["*", "view_assets"], "description": "Everything"}"#,
        )
        .unwrap();
        assert_eq!(
            config.permissions,
            vec![
                PermissionOrWildcard::Wildcard,
                PermissionOrWildcard::Permission(Permission::ViewAssets)
            ]
        );
        assert_eq!(PermissionOrWildcard::Wildcard.expand().len(), Permission::all().len());
    }

    #[test]
    fn test_role_config_rejects_unknown_permission() {
        let result: Result<RoleConfig, _> =
            serde_json::from_str(r#"{"permissions": ["view_everything"]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown permission 'view_everything'"), "{err}");
    }

    #[test]
    fn test_role_config_serializes_back_to_names() {
        let config = RoleConfig {
            permissions: vec![
                PermissionOrWildcard::Permission(Permission::ViewDashboards),
                PermissionOrWildcard::Wildcard,
            ],
            description: String::new(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["permissions"], serde_json::json!(["view_dashboards", "*"]));
    }
}
