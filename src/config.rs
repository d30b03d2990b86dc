//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 后端 API 根地址，例如 "https://api.mediconnect.example"
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// 角色守卫未指定跳转目标时的默认落点
    pub default_redirect: String,
    /// 未认证访问的跳转落点
    pub login_route: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub routing: RoutingConfig,
}

/// 按优先级加载 .env 文件（开发环境）
/// 生产环境应该直接设置环境变量，不依赖 .env 文件
pub fn load_dotenv() {
    if let Ok(profile) = std::env::var("MEDI_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }
}

impl AppConfig {
    /// 从环境变量加载配置（前缀为 MEDI_）
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        settings = settings
            .set_default("api.base_url", "http://localhost:3000")?
            .set_default("api.timeout_secs", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("routing.default_redirect", "/dashboard")?
            .set_default("routing.login_route", "/login")?;

        settings = settings.add_source(
            Environment::with_prefix("MEDI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > 120 {
            return Err(ConfigError::Message(
                "api.timeout_secs must be between 1 and 120".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        for (name, route) in [
            ("routing.default_redirect", &self.routing.default_redirect),
            ("routing.login_route", &self.routing.login_route),
        ] {
            if !route.starts_with('/') {
                return Err(ConfigError::Message(format!(
                    "{} must be an absolute path, got: {}",
                    name, route
                )));
            }
        }

        Ok(())
    }
}
