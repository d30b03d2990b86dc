//! 后端 API 客户端
//! 当前只消费一个端点：当前用户的权限列表

use crate::{config::ApiConfig, error::AppError, models::permission::Permission};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

/// 权限拉取接口
///
/// 解析器通过该 trait 访问后端，测试中以假实现替换。
#[async_trait]
pub trait PermissionsApi: Send + Sync {
    /// GET /users/me/permissions
    async fn fetch_permissions(&self) -> Result<Vec<Permission>, AppError>;
}

/// `GET /users/me/permissions` 的响应体
#[derive(Debug, serde::Deserialize)]
struct PermissionsResponse {
    #[serde(default)]
    permissions: Vec<Permission>,
}

/// reqwest 实现
pub struct HttpPermissionsApi {
    client: Client,
    base_url: String,
    /// 会话持有的访问令牌（Secret 包装，防止日志泄露）
    access_token: Secret<String>,
}

impl HttpPermissionsApi {
    pub fn new(config: &ApiConfig, access_token: Secret<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PermissionsApi for HttpPermissionsApi {
    async fn fetch_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let request_id = Uuid::new_v4();

        let response = self
            .client
            .get(format!("{}/users/me/permissions", self.base_url))
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                request_id = %request_id,
                status = %status,
                "Permission fetch returned non-success status"
            );
            return Err(AppError::PermissionFetch(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: PermissionsResponse = response.json().await?;

        tracing::debug!(
            request_id = %request_id,
            count = body.permissions.len(),
            "Permissions fetched"
        );

        Ok(body.permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api_config() -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_creation() {
        let api =
            HttpPermissionsApi::new(&test_api_config(), Secret::new("token-123".to_string()))
                .unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
    }

    /// 测试地址末尾斜杠被归一化
    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "https://api.mediconnect.example/".to_string(),
            timeout_secs: 5,
        };
        let api = HttpPermissionsApi::new(&config, Secret::new("t".to_string())).unwrap();
        assert_eq!(api.base_url(), "https://api.mediconnect.example");
    }

    /// 测试响应体缺少 permissions 字段时默认为空列表
    #[test]
    fn test_response_missing_permissions_defaults_empty() {
        let body: PermissionsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.permissions.is_empty());
    }

    #[test]
    fn test_response_parse() {
        let body: PermissionsResponse =
            serde_json::from_str(r#"{"permissions": ["appointments:view", "records:view"]}"#)
                .unwrap();
        assert_eq!(body.permissions.len(), 2);
        assert_eq!(body.permissions[0].as_str(), "appointments:view");
    }
}
