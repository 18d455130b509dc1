use serde::{Deserialize, Serialize};

/// Runtime settings the host hands to the browser at `GET /app-config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix prepended to every REST path, e.g. `/api/`.
    pub api_base: String,
    /// Path, relative to `api_base`, accepting `{username, password}`.
    pub login_path: String,
    /// Scheme word placed before the token in the `Authorization` header.
    pub auth_scheme: String,
    pub app_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/".to_string(),
            login_path: "auth/login/".to_string(),
            auth_scheme: "Token".to_string(),
            app_title: "Investigation Case Desk".to_string(),
        }
    }
}

impl AppConfig {
    /// Joins `api_base` and a resource path with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Value for the `Authorization` header, `None` without a token.
    pub fn authorization(&self, token: Option<&str>) -> Option<String> {
        token
            .filter(|t| !t.is_empty())
            .map(|t| format!("{} {}", self.auth_scheme, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        let config = AppConfig::default();
        assert_eq!(
            config.url("investigation/advisories/"),
            "/api/investigation/advisories/"
        );
        assert_eq!(config.url("/auth/login/"), "/api/auth/login/");
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_base":"https://cases.example/api"}"#).unwrap();
        assert_eq!(config.url("x/"), "https://cases.example/api/x/");
        assert_eq!(config.auth_scheme, "Token");
    }

    #[test]
    fn authorization_header_needs_a_token() {
        let config = AppConfig::default();
        assert_eq!(config.authorization(None), None);
        assert_eq!(config.authorization(Some("")), None);
        assert_eq!(
            config.authorization(Some("abc")),
            Some("Token abc".to_string())
        );
    }
}
