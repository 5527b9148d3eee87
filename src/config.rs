use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub mirror_timeout: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_values(
            env::var("DATABASE_URL").ok(),
            env::var("BIND_ADDR").ok(),
            env::var("MIRROR_TIMEOUT_SECS").ok(),
        )
    }

    /// Builds the config from raw variable values; `None` takes the default.
    pub fn from_values(
        database_url: Option<String>,
        bind_addr: Option<String>,
        mirror_timeout_secs: Option<String>,
    ) -> Result<Self, AppError> {
        let database_url =
            database_url.unwrap_or_else(|| "sqlite://hr_training.db?mode=rwc".to_string());

        let bind_addr = bind_addr
            .as_deref()
            .unwrap_or("127.0.0.1:3000")
            .parse::<SocketAddr>()
            .map_err(|e| AppError::BadRequest(format!("BIND_ADDR is invalid: {}", e)))?;

        let mirror_timeout = match mirror_timeout_secs {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AppError::BadRequest(format!("MIRROR_TIMEOUT_SECS is invalid: {}", e)))?,
            None => Duration::from_secs(15),
        };

        Ok(Self {
            database_url,
            bind_addr,
            mirror_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, None, None).unwrap();
        assert_eq!(config.database_url, "sqlite://hr_training.db?mode=rwc");
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.mirror_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_values(
            Some("sqlite::memory:".to_string()),
            Some("0.0.0.0:8080".to_string()),
            Some("3".to_string()),
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.mirror_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_bind_addr_is_rejected() {
        let result = AppConfig::from_values(None, Some("localhost".to_string()), None);
        match result {
            Err(AppError::BadRequest(message)) => assert!(message.contains("BIND_ADDR")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_mirror_timeout_is_rejected() {
        for raw in ["fifteen", "-1", "1.5"] {
            let result = AppConfig::from_values(None, None, Some(raw.to_string()));
            match result {
                Err(AppError::BadRequest(message)) => assert!(message.contains("MIRROR_TIMEOUT_SECS")),
                other => panic!("expected BadRequest for {:?}, got {:?}", raw, other),
            }
        }
    }
}
