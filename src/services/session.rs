//! 会话编排
//! 登录：决定落点路由并解析权限；登出：清除会话状态

use crate::{
    client::PermissionsApi,
    models::user::User,
    routing::dashboard::{self, Navigator, Route},
    services::resolver::SessionPermissions,
};
use std::sync::Arc;

/// 会话管理器
///
/// 每个认证会话构造一次，持有权限解析器与后端客户端，
/// 显式传递给需要能力判断的消费方。
pub struct SessionManager {
    permissions: SessionPermissions,
    api: Arc<dyn PermissionsApi>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn PermissionsApi>) -> Self {
        Self {
            permissions: SessionPermissions::new(),
            api,
        }
    }

    /// 登录流程：先发出落点导航，再解析权限集
    ///
    /// 导航不等待权限解析，落点页面的守卫会通过 loading
    /// 状态挂起受保护内容。
    pub async fn login(&self, user: User, navigator: &dyn Navigator) -> Route {
        let route = dashboard::dispatch(Some(&user), navigator);
        self.permissions.begin_session(user, self.api.as_ref()).await;
        route
    }

    /// 登出：清除解析器状态并跳回登录页
    pub async fn logout(&self, navigator: &dyn Navigator) {
        self.permissions.clear().await;
        dashboard::dispatch(None, navigator);
    }

    pub fn permissions(&self) -> &SessionPermissions {
        &self.permissions
    }
}
