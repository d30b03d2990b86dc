//! 用户会话模型
//! 登录时由认证后端返回，在会话存续期间驻留内存

use super::{permission::Permission, role::Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 认证后端返回的用户对象
///
/// 除 `role` 外所有字段都是可选的：权限列表缺失时由解析器
/// 走拉取/静态表路径，机构字段仅用于登录后跳转决策。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub role: Role,

    /// 登录响应随附的权限列表，非空时免去一次权限拉取
    #[serde(default)]
    pub cached_permissions: Vec<Permission>,

    /// 用户可见的机构数量
    #[serde(default)]
    pub location_count: u32,

    pub primary_location_id: Option<String>,

    #[serde(default)]
    pub assigned_location_ids: Vec<String>,

    /// 后端指定的登陆后跳转路径，优先于角色路由
    pub redirect_to: Option<String>,

    #[serde(default = "Utc::now")]
    pub logged_in_at: DateTime<Utc>,
}

impl User {
    /// 构造仅含角色的用户，其余字段取默认值
    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            cached_permissions: Vec::new(),
            location_count: 0,
            primary_location_id: None,
            assigned_location_ids: Vec::new(),
            redirect_to: None,
            logged_in_at: Utc::now(),
        }
    }

    /// 后端跳转指令，空字符串视为缺失
    pub fn redirect_override(&self) -> Option<&str> {
        self.redirect_to.as_deref().filter(|s| !s.is_empty())
    }
}
