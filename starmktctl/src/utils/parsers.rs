use serde::de::DeserializeOwned;
use starmkt_types::Role;
use std::path::Path;

pub fn parse_role_arg(s: &str) -> Result<Role, String> {
    Role::from_str(s).ok_or_else(|| {
        let allowed: Vec<&str> = Role::all().iter().map(|role| role.as_str()).collect();
        format!(
            "Unknown role '{s}', allowed values are {}",
            allowed.join(", ")
        )
    })
}

pub fn parse_route_path(s: &str) -> Result<String, String> {
    if !s.starts_with('/') {
        return Err("Invalid path, should start with '/' (e.g. /financeiro)".to_string());
    }
    Ok(s.to_string())
}

/// Read a JSON or YAML file. `.json` files are parsed as JSON, everything
/// else as YAML, which also accepts plain JSON.
pub fn read_payload_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let payload = if is_json {
        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?
    } else {
        serde_norway::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?
    };

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmkt_core::admin::CreateUserRequest;

    #[test]
    fn test_parse_role_arg() {
        assert_eq!(parse_role_arg("juridico"), Ok(Role::Legal));
        assert_eq!(parse_role_arg(" Finance "), Ok(Role::Finance));

        let err = parse_role_arg("owner").unwrap_err();
        assert!(err.contains("hub_manager"), "{err}");
    }

    #[test]
    fn test_parse_route_path() {
        assert_eq!(parse_route_path("/patrimonio"), Ok("/patrimonio".to_string()));
        assert!(parse_route_path("patrimonio").is_err());
    }

    #[test]
    fn test_read_payload_file_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("user.yaml");
        std::fs::write(
            &yaml,
            "email: ana@empresa.com\nfull_name: Ana Lima\nrole: legal\n",
        )
        .unwrap();
        let request: CreateUserRequest = read_payload_file(&yaml).unwrap();
        assert_eq!(request.role.as_deref(), Some("legal"));

        let json = dir.path().join("user.json");
        std::fs::write(
            &json,
            r#"{"email": "ana@empresa.com", "full_name": "Ana Lima"}"#,
        )
        .unwrap();
        let request: CreateUserRequest = read_payload_file(&json).unwrap();
        assert!(request.role.is_none());

        let missing = dir.path().join("missing.json");
        assert!(read_payload_file::<CreateUserRequest>(&missing).is_err());
    }
}
