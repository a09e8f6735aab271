use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;

use crate::error::{AppError, AppResult};
use crate::models::PrizeInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// 启动时载入的奖品列表
    #[serde(default = "default_prizes")]
    pub prizes: Vec<PrizeInput>,
    /// 启动时是否先归一化
    #[serde(default)]
    pub normalize_on_start: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            prizes: default_prizes(),
            normalize_on_start: false,
        }
    }
}

fn default_prizes() -> Vec<PrizeInput> {
    vec![
        PrizeInput::new("GET A CLUE", json!(20), json!(0)),
        PrizeInput::new("DETOUR", json!(20), json!(1)),
        PrizeInput::new("ROADBLOCK", json!(60), json!(0)),
    ]
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时使用默认值, 再由环境变量覆盖
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Config file {config_path} not found, using defaults");
                Config::default()
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    /// 环境变量覆盖 (即便文件存在时也覆盖)
    pub fn apply_overrides<F>(&mut self, get_env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get_env("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Some(v) = get_env("WHEEL_NORMALIZE_ON_START")
            && let Ok(b) = v.parse()
        {
            self.wheel.normalize_on_start = b;
        }
    }
}
