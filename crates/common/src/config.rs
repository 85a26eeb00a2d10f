use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use serde::Deserialize;

use crate::types::{ElectrodePolicy, FeasibilityMode};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface the API server binds to
    pub api_host: IpAddr,

    /// Port the API server binds to (default: 8080, what the browser console expects)
    pub api_port: u16,

    /// Feasibility model used when a request does not pick one
    pub validator_mode: FeasibilityMode,

    /// Handling of configurations with fewer than four electrodes
    pub electrode_policy: ElectrodePolicy,

    /// Maximum accepted request body size in bytes (default: 16 KiB)
    pub max_body_bytes: usize,

    /// Tracing output format
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            api_port: 8080,
            validator_mode: FeasibilityMode::Full,
            electrode_policy: ElectrodePolicy::Reject,
            max_body_bytes: 16 * 1024,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_host: std::env::var("API_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_HOST must be a valid IP address"))?,
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            validator_mode: std::env::var("VALIDATOR_MODE")
                .unwrap_or_else(|_| "full".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("VALIDATOR_MODE: {}", e))?,
            electrode_policy: std::env::var("ELECTRODE_POLICY")
                .unwrap_or_else(|_| "reject".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("ELECTRODE_POLICY: {}", e))?,
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "16384".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a valid usize"))?,
            log_format: std::env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("LOG_FORMAT: {}", e))?,
        })
    }

    /// Socket address the API server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.api_port)
    }
}
