//! 统一错误模型
//! 定义访问决策层的所有错误类型

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// 权限拉取失败。解析器内部会降级到静态角色表，
    /// 该错误不应传播到能力判断的调用方。
    #[error("Permission fetch failed: {0}")]
    PermissionFetch(String),

    /// 受保护上下文中缺少会话。这是接线缺陷，不是运行时状态。
    #[error("No active session in a protected context")]
    MissingSession,

    #[error("Invalid permission string: {0}")]
    InvalidPermission(String),
}

impl AppError {
    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::PermissionFetch(_) => "Unable to load permissions".to_string(),
            AppError::MissingSession => "Please sign in to continue".to_string(),
            AppError::InvalidPermission(_) => "Invalid permission".to_string(),
        }
    }

    /// 该错误是否可以本地恢复（不向用户暴露）
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::PermissionFetch(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::PermissionFetch(e.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
