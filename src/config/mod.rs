//! Configuration module for the teams backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for the editor surface (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory holding the render templates
    pub template_dir: PathBuf,
    /// Asset URL substituted for the template placeholder token
    pub placeholder_image_url: String,
    /// Installation authorization gate for the editor surface
    pub install_authorized: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("TEAMS_API_PSK").ok();

        let db_path = env::var("TEAMS_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let template_dir = env::var("TEAMS_TEMPLATE_DIR")
            .unwrap_or_else(|_| "./templates".to_string())
            .into();

        let placeholder_image_url = env::var("TEAMS_PLACEHOLDER_IMAGE_URL")
            .unwrap_or_else(|_| "/assets/images/placeholder-full.png".to_string());

        let install_authorized = env::var("TEAMS_INSTALL_AUTHORIZED")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let bind_addr = env::var("TEAMS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TEAMS_BIND_ADDR format");

        let log_level = env::var("TEAMS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_psk,
            db_path,
            template_dir,
            placeholder_image_url,
            install_authorized,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("TEAMS_API_PSK");
        env::remove_var("TEAMS_DB_PATH");
        env::remove_var("TEAMS_TEMPLATE_DIR");
        env::remove_var("TEAMS_PLACEHOLDER_IMAGE_URL");
        env::remove_var("TEAMS_INSTALL_AUTHORIZED");
        env::remove_var("TEAMS_BIND_ADDR");
        env::remove_var("TEAMS_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.template_dir, PathBuf::from("./templates"));
        assert_eq!(
            config.placeholder_image_url,
            "/assets/images/placeholder-full.png"
        );
        assert!(config.install_authorized);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
