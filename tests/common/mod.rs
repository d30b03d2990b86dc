//! 测试公共模块
//! 提供用户构造辅助、假后端与记录式导航器

#![allow(dead_code)]

use async_trait::async_trait;
use mediconnect_access::{
    client::PermissionsApi,
    error::AppError,
    models::{permission::Permission, role::Role, user::User},
    routing::dashboard::Navigator,
};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// 构造仅含角色的测试用户
pub fn user_with_role(role: Role) -> User {
    User::with_role(role)
}

/// 构造带登录缓存权限的测试用户
pub fn user_with_cached(role: Role, permissions: &[Permission]) -> User {
    let mut user = User::with_role(role);
    user.cached_permissions = permissions.to_vec();
    user
}

/// 总是成功返回固定权限列表的假后端
pub struct StaticApi {
    permissions: Vec<Permission>,
}

impl StaticApi {
    pub fn new(permissions: Vec<Permission>) -> Self {
        Self { permissions }
    }
}

#[async_trait]
impl PermissionsApi for StaticApi {
    async fn fetch_permissions(&self) -> Result<Vec<Permission>, AppError> {
        Ok(self.permissions.clone())
    }
}

/// 总是失败的假后端，用于触发静态表回退
pub struct FailingApi;

#[async_trait]
impl PermissionsApi for FailingApi {
    async fn fetch_permissions(&self) -> Result<Vec<Permission>, AppError> {
        Err(AppError::PermissionFetch("connection refused".to_string()))
    }
}

/// 收到信号前一直挂起的假后端，用于构造在途请求
pub struct BlockingApi {
    release: Mutex<Option<oneshot::Receiver<Vec<Permission>>>>,
}

impl BlockingApi {
    /// 返回 (api, sender)，向 sender 发送列表即放行请求
    pub fn new() -> (Self, oneshot::Sender<Vec<Permission>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                release: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl PermissionsApi for BlockingApi {
    async fn fetch_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let rx = self
            .release
            .lock()
            .unwrap()
            .take()
            .expect("BlockingApi supports a single fetch");
        rx.await
            .map_err(|_| AppError::PermissionFetch("release channel dropped".to_string()))
    }
}

/// 记录所有历史替换导航的导航器
#[derive(Default)]
pub struct RecordingNavigator {
    replaced: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replaced_paths(&self) -> Vec<String> {
        self.replaced.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.replaced.lock().unwrap().push(path.to_string());
    }
}
