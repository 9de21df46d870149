//! Configuration management
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults, with the `SIP_HOST`, `SIP_USERNAME`, `SIP_PASSWORD`
//!    and `SIP_DOMAIN` environment variables substituted when set
//! 2. The file named by `CONFIG_FILE`, if present. The format follows the
//!    extension (`.json`, `.toml`, `.yaml`, ...); anything else is read as JSON
//! 3. `CATISIP__`-prefixed environment variables, e.g. `CATISIP__SERVER__PORT=9090`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the optional config file
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

const ENV_PREFIX: &str = "CATISIP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sip: SipConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// SIP endpoint descriptor.
///
/// Carried by the call registry as opaque configuration; nothing signals
/// against it yet.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SipConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub domain: String,
}

impl fmt::Debug for SipConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Timings for the call lifecycle simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Delay between placing a call and it ringing
    pub ringing_delay_ms: u64,
    /// Delay between ringing and answer
    pub answer_delay_ms: u64,
}

impl SimulationConfig {
    pub fn ringing_delay(&self) -> Duration {
        Duration::from_millis(self.ringing_delay_ms)
    }

    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ringing_delay_ms: 2_000,
            answer_delay_ms: 3_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            sip: SipConfig {
                host: "localhost".to_string(),
                port: 5060,
                username: "1000".to_string(),
                password: "1234".to_string(),
                domain: "localhost".to_string(),
            },
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.is_empty());
        let defaults = Self::with_env_defaults(|key| std::env::var(key).ok());
        Self::layered(defaults, path.as_deref())
    }

    /// Defaults with the legacy `SIP_*` variables applied.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_defaults<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: String| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or(default)
        };

        let mut config = Self::default();
        config.sip.host = var("SIP_HOST", config.sip.host);
        config.sip.username = var("SIP_USERNAME", config.sip.username);
        config.sip.password = var("SIP_PASSWORD", config.sip.password);
        config.sip.domain = var("SIP_DOMAIN", config.sip.domain);
        config
    }

    /// Layer an optional file and prefixed environment variables over `defaults`
    pub fn layered(defaults: Self, path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&defaults)?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::new(path, file_format(path)).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn file_format(path: &str) -> config::FileFormat {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("toml") => config::FileFormat::Toml,
        Some("yaml") | Some("yml") => config::FileFormat::Yaml,
        Some("ini") => config::FileFormat::Ini,
        Some("ron") => config::FileFormat::Ron,
        Some("json5") => config::FileFormat::Json5,
        _ => config::FileFormat::Json,
    }
}
