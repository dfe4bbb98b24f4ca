use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::environment;
use crate::tools::utils::{DEFAULT_MAX_RESPONSE_SIZE, DEFAULT_USER_AGENT};
use crate::tools::weather;

pub const CONFIG_PATH_ENV: &str = "MCP_WEB_BROWSING_CONFIG";

/// Tools that stay off unless `[features]` switches them on.
const DISABLED_BY_DEFAULT: &[&str] = &[weather::NAME];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub max_response_size: usize,
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: weather::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub features: HashMap<String, bool>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn load_default() -> Self {
        if let Some(explicit) = environment::var(CONFIG_PATH_ENV) {
            tracing::info!(path = %explicit, env = CONFIG_PATH_ENV, "using config from environment");
            return Self::load_from_path(explicit);
        }

        if let Ok(mut exe_path) = std::env::current_exe() {
            exe_path.pop();
            let exe_cfg = exe_path.join("config.toml");
            if exe_cfg.exists() {
                tracing::info!(path = %exe_cfg.display(), "using config next to executable");
                return Self::load_from_path(exe_cfg);
            }
        }

        tracing::info!("no config.toml found; using defaults");
        Self::default()
    }

    /// Apply environment overrides on top of file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ua) = environment::user_agent_override() {
            self.http.user_agent = ua;
        }
        if let Some(base) = environment::weather_base_url_override() {
            self.weather.base_url = base;
        }
        self
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.features
            .get(name)
            .copied()
            .unwrap_or(!DISABLED_BY_DEFAULT.contains(&name))
    }
}
