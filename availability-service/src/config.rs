use crate::calendar::WeekendMode;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 5;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockSourceConfig {
    File { path: PathBuf },
    Api { base_url: String, timeout: Duration },
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub stock_source: StockSourceConfig,
    pub weekend_mode: WeekendMode,
    /// Periodic stock source reload; `None` loads once at startup.
    pub reload_interval: Option<Duration>,
    pub allowed_origins: Vec<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let host = match get("HOST") {
            Some(v) => v.parse::<IpAddr>().map_err(|e| invalid("HOST", v, e))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|e| invalid("PORT", v, e))?,
            None => DEFAULT_PORT,
        };

        let stock_source = match get("STOCK_SOURCE").map(str::to_ascii_lowercase).as_deref() {
            None | Some("file") => StockSourceConfig::File {
                path: PathBuf::from(get("INVENTORY_FILE").unwrap_or(DEFAULT_INVENTORY_FILE)),
            },
            Some("api") => {
                let base_url = get("INVENTORY_API_URL")
                    .ok_or(ConfigError::Missing("INVENTORY_API_URL"))?
                    .to_string();
                let timeout_secs = match get("INVENTORY_API_TIMEOUT_SECS") {
                    Some(v) => v
                        .parse::<u64>()
                        .map_err(|e| invalid("INVENTORY_API_TIMEOUT_SECS", v, e))?,
                    None => DEFAULT_API_TIMEOUT_SECS,
                };
                StockSourceConfig::Api {
                    base_url,
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
            Some(other) => {
                return Err(invalid("STOCK_SOURCE", other, "expected 'file' or 'api'"));
            }
        };

        let weekend_mode = match get("AVAILABILITY_WEEKEND_MODE") {
            Some(v) => v
                .parse::<WeekendMode>()
                .map_err(|e| invalid("AVAILABILITY_WEEKEND_MODE", v, e))?,
            None => WeekendMode::System,
        };

        let reload_interval = match get("INVENTORY_RELOAD_SECS") {
            Some(v) => {
                let secs = v
                    .parse::<u64>()
                    .map_err(|e| invalid("INVENTORY_RELOAD_SECS", v, e))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            host,
            port,
            stock_source,
            weekend_mode,
            reload_interval,
            allowed_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
