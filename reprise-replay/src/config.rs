use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use reprise_codec::OutboundPolicy;
use reprise_fuzzer::DEFAULT_MAX_REQUESTS;
use reprise_web::{ClientConfig, RateLimiter};

use crate::ConfigError;

const CONFIG_DIR: &str = "reprise";
const CONFIG_FILENAME: &str = "reprise.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplayConfig {
    pub client: ClientSection,
    pub outbound: OutboundPolicy,
    pub attack: AttackSection,
    pub capture: CaptureSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSection {
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AttackSection {
    pub max_requests: usize,
    /// Minimum gap between attack requests; 0 disables throttling.
    pub throttle_ms: u64,
}

impl Default for AttackSection {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            throttle_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureSection {
    pub dedupe_on_ingest: bool,
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self {
            dedupe_on_ingest: true,
        }
    }
}

impl ReplayConfig {
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(CONFIG_DIR).join(CONFIG_FILENAME)
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| ConfigError::Io(err.to_string()))?;
        }
        let raw =
            toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))?;
        std::fs::write(path, raw).map_err(|err| ConfigError::Io(err.to_string()))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.client.timeout_secs),
            accept_invalid_certs: self.client.accept_invalid_certs,
        }
    }

    pub fn throttle(&self) -> Option<RateLimiter> {
        (self.attack.throttle_ms > 0)
            .then(|| RateLimiter::from_delay(Duration::from_millis(self.attack.throttle_ms)))
    }
}
