use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

use crate::db::DbSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub database_path: String,
    pub db_max_connections: u32,
    pub db_connect_timeout_ms: u64,
    pub update_policy: UpdatePolicy,
}

/// How an update treats the submitted `completed` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Store the parsed flag when one is given, otherwise keep the current value.
    Corrected,
    /// Mark the item completed on every update, whatever was submitted.
    Legacy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let bind_addr = env_map
            .get("BIND_ADDR")
            .map(|s| s.as_str())
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BIND_ADDR".to_string(),
                    "must be an IPv4 or IPv6 address".to_string(),
                )
            })?;

        let database_path = match env_map.get("DATABASE_PATH").map(|s| s.trim()) {
            Some("") => {
                return Err(ConfigError::InvalidValue(
                    "DATABASE_PATH".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(path) => path.to_string(),
            None => "data/items.db".to_string(),
        };

        let db_max_connections = env_map
            .get("DB_MAX_CONNECTIONS")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DB_MAX_CONNECTIONS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let db_connect_timeout_ms = env_map
            .get("DB_CONNECT_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("10000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DB_CONNECT_TIMEOUT_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        let update_policy = match env_map
            .get("UPDATE_POLICY")
            .map(|s| s.as_str())
            .unwrap_or("corrected")
        {
            "corrected" => UpdatePolicy::Corrected,
            "legacy" => UpdatePolicy::Legacy,
            other => {
                return Err(ConfigError::InvalidValue(
                    "UPDATE_POLICY".to_string(),
                    format!("must be corrected or legacy, got {}", other),
                ))
            }
        };

        Ok(Config {
            port,
            bind_addr,
            database_path,
            db_max_connections,
            db_connect_timeout_ms,
            update_policy,
        })
    }

    pub fn db_settings(&self) -> DbSettings {
        DbSettings {
            path: self.database_path.clone(),
            max_connections: self.db_max_connections,
            connect_timeout: Duration::from_millis(self.db_connect_timeout_ms),
        }
    }

    pub fn log_startup(&self) {
        tracing::info!(
            port = self.port,
            bind_addr = %self.bind_addr,
            database_path = %self.database_path,
            db_max_connections = self.db_max_connections,
            update_policy = ?self.update_policy,
            "Configuration loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
        assert_eq!(config.database_path, "data/items.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_connect_timeout_ms, 10000);
        assert_eq!(config.update_policy, UpdatePolicy::Corrected);
    }

    #[test]
    fn test_all_values() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "9090".to_string());
        env_map.insert("BIND_ADDR".to_string(), "127.0.0.1".to_string());
        env_map.insert("DATABASE_PATH".to_string(), "/tmp/todo.db".to_string());
        env_map.insert("DB_MAX_CONNECTIONS".to_string(), "2".to_string());
        env_map.insert("DB_CONNECT_TIMEOUT_MS".to_string(), "500".to_string());
        env_map.insert("UPDATE_POLICY".to_string(), "legacy".to_string());

        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1");
        assert_eq!(config.database_path, "/tmp/todo.db");
        assert_eq!(config.update_policy, UpdatePolicy::Legacy);

        let settings = config.db_settings();
        assert_eq!(settings.path, "/tmp/todo.db");
        assert_eq!(settings.max_connections, 2);
        assert_eq!(settings.connect_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_bind_addr() {
        let mut env_map = HashMap::new();
        env_map.insert("BIND_ADDR".to_string(), "localhost".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BIND_ADDR"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_empty_database_path() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_PATH".to_string(), "  ".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_PATH"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_zero_max_connections() {
        let mut env_map = HashMap::new();
        env_map.insert("DB_MAX_CONNECTIONS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DB_MAX_CONNECTIONS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_update_policy() {
        let mut env_map = HashMap::new();
        env_map.insert("UPDATE_POLICY".to_string(), "strict".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, msg)) => {
                assert_eq!(k, "UPDATE_POLICY");
                assert!(msg.contains("strict"));
            }
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
