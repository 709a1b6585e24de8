/*
[INPUT]:  Optional YAML configuration file and FASTAUTH_* environment
[OUTPUT]: Parsed application configuration
[POS]:    Configuration layer - wallet and runtime setup
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use fastauth_adapter::WalletConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "FASTAUTH";
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;

/// Top-level configuration for the fast-auth app
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Wallet provider settings passed to the gateway
    pub wallet: WalletConfig,
    /// Upper bound for a single gateway call; unset waits indefinitely
    #[serde(default)]
    pub call_timeout_secs: Option<u64>,
    /// Default tracing filter when `--log-level` is not given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallet: WalletConfig::default(),
            call_timeout_secs: Some(DEFAULT_CALL_TIMEOUT_SECS),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load defaults, then the YAML file (if any), then `FASTAUTH_*` variables.
    ///
    /// Nested keys use `__`, e.g. `FASTAUTH_WALLET__RELAYER_URL`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`] but reads variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> anyhow::Result<Self> {
        let defaults = AppConfig::default();
        let mut builder = Config::builder()
            .set_default("wallet.network_id", defaults.wallet.network_id)?
            .set_default("wallet.relayer_url", defaults.wallet.relayer_url)?
            .set_default("wallet.wallet_url", defaults.wallet.wallet_url)?
            .set_default("wallet.contract_id", defaults.wallet.contract_id)?
            .set_default("wallet.wallet_id", defaults.wallet.wallet_id)?
            .set_default("call_timeout_secs", DEFAULT_CALL_TIMEOUT_SECS)?
            .set_default("log_level", defaults.log_level)?;

        if let Some(path) = path {
            let path_str = path
                .to_str()
                .context("config path must be valid utf-8")?;
            builder = builder.add_source(File::new(path_str, FileFormat::Yaml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        Ok(config)
    }

    /// Load configuration from a YAML file only
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }

    /// True while any wallet setting still holds a placeholder value
    pub fn has_placeholders(&self) -> bool {
        [
            &self.wallet.relayer_url,
            &self.wallet.wallet_url,
            &self.wallet.contract_id,
        ]
        .iter()
        .any(|value| value.starts_with("YOUR_"))
    }
}
