//! 统一错误模型
//! 只有客户端前置条件失败才会成为错误，服务端的 4xx/5xx 作为普通响应返回

use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ClientError>;

/// 客户端错误类型
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// 是否为本地前置条件失败（凭据缺失或配置不可用）
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ClientError::MissingCredential(_) | ClientError::Configuration(_)
        )
    }

    /// 稳定的错误类别名称，用于结构化日志
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "transport",
            ClientError::MissingCredential(_) => "missing_credential",
            ClientError::Configuration(_) => "configuration",
        }
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Configuration(e.to_string())
    }
}
