//! Zojnik 食品 API 测试客户端
//! 提供带凭据持久化的 API 客户端和共享类型

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod session;
pub mod telemetry;

pub use client::{ApiClient, ApiResponse, ResponseBody};
pub use config::ClientConfig;
pub use credentials::{CredentialKeys, CredentialStore};
pub use error::{ClientError, Result};
