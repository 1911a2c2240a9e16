//! 配置系统
//! 从环境变量加载客户端配置（前缀 ZOJNIK_）

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认的远端 API 地址
pub const DEFAULT_BASE_URL: &str = "https://api.dev.zojnikfood.ru";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 远端 API 根地址，例如 "https://api.dev.zojnikfood.ru"
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// 凭据文件路径（key=value 格式）
    pub path: PathBuf,
}

impl CredentialsConfig {
    /// 凭据文件的实际位置
    ///
    /// 相对路径从当前目录开始逐级向上查找，找不到时原样返回（首次写入时创建）。
    pub fn resolve(&self) -> PathBuf {
        if self.path.is_absolute() {
            return self.path.clone();
        }
        std::env::current_dir()
            .ok()
            .and_then(|cwd| find_upwards(&cwd, &self.path))
            .unwrap_or_else(|| self.path.clone())
    }
}

/// 在 `start` 及其所有父目录中查找 `relative` 指向的文件
pub fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty, compact
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 是否通过 tracing 输出每个响应的诊断内容
    pub dump_responses: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

impl ClientConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = Self::defaults()?.add_source(
            Environment::with_prefix("ZOJNIK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: ClientConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 默认配置，只替换 API 地址
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config: ClientConfig = Self::defaults()?
            .set_override("api.base_url", base_url.into())?
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("credentials.path", ".env")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("output.dump_responses", true)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证 API 地址
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Message(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Message(format!(
                    "Unsupported api.base_url scheme: {}. Must be http or https",
                    other
                )))
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty, compact",
                    self.logging.format
                )))
            }
        }

        if self.credentials.path.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "credentials.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
