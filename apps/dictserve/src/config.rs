//! # Config Module
//!
//! Resolved server settings. Flags override environment variables, which
//! override the defaults below; the layering itself is done by clap.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::cli::CliError;

/// Where the hosting platform mounts the model artifacts.
pub const DEFAULT_MODEL_DIR: &str = "/opt/ml/model";

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the platform sends traffic to.
pub const DEFAULT_PORT: u16 = 8080;

/// Synchronous invocation payload cap (6 MiB).
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Settings for `dictserve serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub model_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServeConfig {
    /// Parse the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, CliError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| CliError::Config(format!("Invalid bind host: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Reject settings that cannot work before anything is loaded.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.model_dir.is_dir() {
            return Err(CliError::Config(format!(
                "Model directory does not exist: {}",
                self.model_dir.display()
            )));
        }
        self.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_contract() {
        let config = ServeConfig::default();
        assert_eq!(config.model_dir, PathBuf::from("/opt/ml/model"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn invalid_host_is_config_error() {
        let config = ServeConfig {
            host: "not-an-ip".to_string(),
            ..ServeConfig::default()
        };
        assert!(matches!(config.socket_addr(), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_model_dir_fails_validation() {
        let config = ServeConfig {
            model_dir: PathBuf::from("/definitely/not/here"),
            ..ServeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn existing_model_dir_passes_validation() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServeConfig {
            model_dir: dir.path().to_path_buf(),
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        assert!(config.validate().is_ok());
    }
}
