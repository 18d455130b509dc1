//! Host settings, layered from defaults, an optional TOML file and `CASEDESK_*`
//! environment variables (highest precedence).
//!
//! The file is `casedesk.toml` in the working directory unless `CASEDESK_CONFIG`
//! names another path.

use std::env;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use common::config::AppConfig;

const DEFAULT_FILE: &str = "casedesk.toml";
const FILE_VAR: &str = "CASEDESK_CONFIG";
const ENV_PREFIX: &str = "CASEDESK";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Base URL of the REST backend that `/api/*` is forwarded to.
    pub upstream_url: String,
    pub api_base: String,
    pub login_path: String,
    pub auth_scheme: String,
    pub app_title: String,
    pub open_browser: bool,
    pub upstream_timeout_secs: u64,
    /// Largest request body accepted for forwarding.
    pub json_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let app = AppConfig::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upstream_url: "http://127.0.0.1:8000".to_string(),
            api_base: app.api_base,
            login_path: app.login_path,
            auth_scheme: app.auth_scheme,
            app_title: app.app_title,
            open_browser: false,
            upstream_timeout_secs: 30,
            json_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(FILE_VAR).unwrap_or_else(|_| DEFAULT_FILE.to_string());
        Config::builder()
            .add_source(File::with_name(&path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// What the browser receives from `GET /app-config`.
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            api_base: self.api_base.clone(),
            login_path: self.login_path.clone(),
            auth_scheme: self.auth_scheme.clone(),
            app_title: self.app_title.clone(),
        }
    }

    /// Local mount point of the forwarder, e.g. `/api`. `None` when the browser is
    /// pointed at an absolute API URL and talks to it directly.
    pub fn proxy_mount(&self) -> Option<String> {
        if !self.api_base.starts_with('/') {
            return None;
        }
        let trimmed = self.api_base.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(format!("/{}", trimmed))
    }

    pub fn public_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(from_toml(""), Settings::default());
    }

    #[test]
    fn file_overrides_individual_keys() {
        let settings = from_toml(
            r#"
            port = 9000
            upstream_url = "https://gst.example.org"
            auth_scheme = "Bearer"
            "#,
        );
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.upstream_url, "https://gst.example.org");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.app_config().auth_scheme, "Bearer");
        assert_eq!(settings.app_config().login_path, "auth/login/");
    }

    #[test]
    fn proxy_mount_follows_api_base() {
        let mut settings = Settings::default();
        assert_eq!(settings.proxy_mount().as_deref(), Some("/api"));
        settings.api_base = "/backend/v1/".into();
        assert_eq!(settings.proxy_mount().as_deref(), Some("/backend/v1"));
        settings.api_base = "https://gst.example.org/api/".into();
        assert_eq!(settings.proxy_mount(), None);
    }
}
