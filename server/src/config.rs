//! Configuration
//!
//! CLI arguments with environment variable fallbacks using clap.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Used when SESSION_SECRET is unset. Fine for a laptop, not for a deployment.
pub const FALLBACK_SESSION_SECRET: &str = "handleliste-development-secret";

/// Handleliste - a shared shopping list
#[derive(Parser, Debug, Clone)]
#[command(name = "handleliste")]
#[command(about = "Shopping list server with a password-protected JSON API")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Address to bind
    #[arg(long = "bind", env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: IpAddr,

    /// SQLite database file
    #[arg(long = "database", env = "DATABASE_PATH", default_value = "shoppinglist.db")]
    pub database_path: PathBuf,

    /// Directory with the built frontend
    #[arg(long, env = "STATIC_DIR", default_value = "dist")]
    pub static_dir: PathBuf,

    /// Shared login password. Login fails with 500 until it is set.
    #[arg(long, env = "APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,

    /// HS256 key for session cookies
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    /// Session lifetime in days
    #[arg(long, env = "SESSION_DAYS", default_value = "30")]
    pub session_days: i64,

    /// Mark the session cookie `Secure` (serve over HTTPS)
    #[arg(long, env = "SECURE_COOKIE", default_value = "false")]
    pub secure_cookie: bool,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// The configured secret, or the fallback
    pub fn session_secret(&self) -> &str {
        self.session_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_SESSION_SECRET)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.session_days < 1 {
            return Err("SESSION_DAYS must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: IpAddr::from([0, 0, 0, 0]),
            database_path: PathBuf::from("shoppinglist.db"),
            static_dir: PathBuf::from("dist"),
            app_password: None,
            session_secret: None,
            session_days: 30,
            secure_cookie: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_cli() {
        let config = Config::try_parse_from(["handleliste"]).unwrap();
        assert_eq!(config.listen_addr().port(), 3000);
        assert_eq!(config.session_days, 30);
        assert!(!config.secure_cookie);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "handleliste",
            "--port",
            "8080",
            "--bind",
            "127.0.0.1",
            "--session-secret",
            "s3cret",
            "--secure-cookie",
        ])
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.session_secret(), "s3cret");
        assert!(config.secure_cookie);
    }

    #[test]
    fn test_blank_secret_falls_back() {
        let config = Config {
            session_secret: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.session_secret(), FALLBACK_SESSION_SECRET);
    }

    #[test]
    fn test_validate_session_days() {
        let config = Config { session_days: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
