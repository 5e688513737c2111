use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

/// Connection pool parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Taken from `DATABASE_URL` when that variable is set.
    pub url: Option<String>,
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout_secs: u64,
}

/// Storage for uploaded school images.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Directory the images are written to and served from.
    pub dir: PathBuf,
    /// URL prefix stored in the record, e.g. `/schoolImages`.
    pub public_prefix: String,
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/schoolImages"),
            public_prefix: "/schoolImages".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Settings {
    /// Rejects values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.uploads.max_image_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "uploads.max_image_bytes must be greater than 0".to_string(),
            ));
        }
        let prefix = &self.uploads.public_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "uploads.public_prefix must be an absolute path below '/', got {prefix:?}"
            )));
        }
        Ok(())
    }
}
