// crates/cityvote-core/src/config.rs

use std::env;

use once_cell::sync::OnceCell;
use tracing::info;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Environment variable overriding the voting backend host.
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
/// Environment variable overriding where the dataset files live.
pub const DATA_BASE_URL_VAR: &str = "DATA_BASE_URL";

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the voting backend, e.g. `https://vote.example.com`.
    /// Defaults to empty; callers must check before building a client.
    pub api_base_url: String,
    /// Base URL or local directory holding `cities.json`, `admin1.json`
    /// and `admin2.json`.
    pub data_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: var_or(API_BASE_URL_VAR, ""),
            data_base: var_or(DATA_BASE_URL_VAR, "./data"),
        }
    }

    /// Process-wide configuration, read on first use.
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            info!("{key} not set, using default: {default:?}");
            default.to_string()
        }
    }
}
