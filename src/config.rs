//! Server configuration loaded from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FRONTEND: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Origin allowed by CORS (the voting frontend)
    pub frontend_origin: String,
    /// Snapshot file for persistence (None = in-memory only)
    pub data_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            frontend_origin: DEFAULT_FRONTEND.to_string(),
            data_file: None,
        }
    }
}

impl AppConfig {
    /// Load config from environment variables
    /// PORT, BIND_ADDR, FRONTEND and DATA_FILE are all optional
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = parse_var("PORT").unwrap_or(defaults.port);
        let bind_addr = parse_var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let frontend_origin = non_empty_var("FRONTEND").unwrap_or(defaults.frontend_origin);

        let data_file = non_empty_var("DATA_FILE").map(PathBuf::from);
        match &data_file {
            Some(path) => tracing::info!("Persisting state to {}", path.display()),
            None => tracing::warn!("DATA_FILE not set, state will be lost on shutdown"),
        }

        Self {
            bind_addr,
            port,
            frontend_origin,
            data_file,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = non_empty_var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Invalid {} value '{}': {}, using default", key, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["PORT", "BIND_ADDR", "FRONTEND", "DATA_FILE"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().port(), 3000);
    }

    #[test]
    #[serial]
    fn test_reads_values() {
        clear_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BIND_ADDR", "127.0.0.1");
        std::env::set_var("FRONTEND", "https://jam.example.org");
        std::env::set_var("DATA_FILE", "/tmp/jamvote.json");

        let config = AppConfig::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.frontend_origin, "https://jam.example.org");
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/jamvote.json")));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_data_file_is_none() {
        clear_env();
        std::env::set_var("DATA_FILE", "   ");
        assert_eq!(AppConfig::from_env().data_file, None);
        clear_env();
    }
}
