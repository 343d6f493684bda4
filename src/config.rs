use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const APP_DIR: &str = "exchange-tui";
pub const API_KEY_ENV: &str = "EXCHANGE_API_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 应用配置 (~/.config/exchange-tui/config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// 环境变量中的 API key 优先于配置文件
    pub fn with_api_key_override(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        self
    }

    /// 请求超时，0 表示不限时
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// 日志文件路径，未配置时位于数据目录 (~/.local/share/exchange-tui/)
    pub fn log_path(&self) -> io::Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "cannot locate user data directory")
        })?;

        Ok(data_dir.join(APP_DIR).join(format!("{}.log", APP_DIR)))
    }
}

/// 默认配置文件路径
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// 解析 TOML 配置
pub fn parse_config(content: &str) -> io::Result<AppConfig> {
    toml::from_str(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 从文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> io::Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// 加载默认位置的配置并应用环境变量
pub fn load() -> io::Result<AppConfig> {
    let config = match config_path() {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };

    Ok(config.with_api_key_override(env::var(API_KEY_ENV).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("api_key = \"abc123\"\n").unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_invalid_config_is_invalid_data() {
        let err = parse_config("request_timeout_secs = \"soon\"").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let path = env::temp_dir().join("exchange-tui-test-missing").join("config.toml");
        assert_eq!(load_config(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_api_key_override() {
        let config = AppConfig::default().with_api_key_override(Some(" from-env ".to_string()));
        assert_eq!(config.api_key, "from-env");

        let config = parse_config("api_key = \"file\"")
            .unwrap()
            .with_api_key_override(Some("   ".to_string()));
        assert_eq!(config.api_key, "file");

        let config = config.with_api_key_override(None);
        assert_eq!(config.api_key, "file");
    }

    #[test]
    fn test_zero_timeout_means_unlimited() {
        let config = parse_config("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout(), None);

        let config = parse_config("request_timeout_secs = 3").unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_explicit_log_file() {
        let config = parse_config("log_file = \"/tmp/exchange.log\"").unwrap();
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/exchange.log"));
    }
}
