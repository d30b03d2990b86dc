//! 权限解析服务
//! 回答当前用户的能力判断，三级解析：登录缓存 → 后端拉取 → 静态表

use crate::{
    client::PermissionsApi,
    error::AppError,
    models::{
        permission::{catalog, Permission, ADMIN_BLOCKED_APPOINTMENT_ACTIONS},
        role::Role,
        user::User,
    },
    policy,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 生效权限集的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSource {
    /// 尚未解析（无用户或解析中）
    None,
    /// 登录响应随附的权限列表
    LoginCache,
    /// `GET /users/me/permissions` 拉取结果
    Backend,
    /// 拉取失败后的静态角色表回退
    StaticFallback,
}

impl PermissionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionSource::None => "none",
            PermissionSource::LoginCache => "login_cache",
            PermissionSource::Backend => "backend",
            PermissionSource::StaticFallback => "static_fallback",
        }
    }
}

/// 权限解析器状态
///
/// 所有能力判断都是当前状态的纯函数。状态在每次解析完成时
/// 整体替换，从不原地修改。
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    user: Option<User>,
    permissions: HashSet<Permission>,
    source: PermissionSource,
    loading: bool,
}

impl PermissionResolver {
    /// 未登录状态
    pub fn signed_out() -> Self {
        Self {
            user: None,
            permissions: HashSet::new(),
            source: PermissionSource::None,
            loading: false,
        }
    }

    /// 解析中状态（用户已知，权限集未就绪）
    pub fn loading_for(user: User) -> Self {
        Self {
            user: Some(user),
            permissions: HashSet::new(),
            source: PermissionSource::None,
            loading: true,
        }
    }

    /// 已解析状态（测试与宿主直接构造用）
    pub fn resolved(user: User, permissions: HashSet<Permission>, source: PermissionSource) -> Self {
        Self {
            user: Some(user),
            permissions,
            source,
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn source(&self) -> PermissionSource {
        self.source
    }

    pub fn permissions(&self) -> &HashSet<Permission> {
        &self.permissions
    }

    /// 当前用户是否拥有权限
    ///
    /// SUPER_ADMIN 全量放行，LOCATION_ADMIN 查集合，二者对三个
    /// 预约操作权限均被硬性拦截，无论集合内容如何。
    pub fn has_permission(&self, permission: &Permission) -> bool {
        let Some(user) = &self.user else {
            return false;
        };

        match &user.role {
            Role::SuperAdmin => !ADMIN_BLOCKED_APPOINTMENT_ACTIONS.contains(permission),
            Role::LocationAdmin if ADMIN_BLOCKED_APPOINTMENT_ACTIONS.contains(permission) => false,
            _ => self.permissions.contains(permission),
        }
    }

    /// 拥有列表中任意一个权限即通过，空列表不通过
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// 必须拥有列表中全部权限，空列表视为通过
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }

    /// 角色精确匹配
    pub fn has_role(&self, role: &Role) -> bool {
        self.user.as_ref().is_some_and(|u| &u.role == role)
    }

    /// 角色属于给定列表
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user.as_ref().is_some_and(|u| roles.contains(&u.role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_any_role(&Role::ADMIN_ROLES)
    }

    pub fn is_operational_staff(&self) -> bool {
        self.has_any_role(&Role::OPERATIONAL_ROLES)
    }

    pub fn can_accept_appointments(&self) -> bool {
        self.has_permission(&catalog::APPOINTMENTS_ACCEPT)
    }

    pub fn can_modify_appointments(&self) -> bool {
        self.has_permission(&catalog::APPOINTMENTS_UPDATE)
    }

    pub fn can_invite_users(&self) -> bool {
        self.has_permission(&catalog::STAFF_INVITE)
    }

    pub fn can_manage_locations(&self) -> bool {
        self.has_permission(&catalog::LOCATIONS_MANAGE)
    }
}

struct ResolverState {
    resolver: PermissionResolver,
    /// 每次用户身份变更递增，用于丢弃过期的解析结果
    generation: u64,
}

/// 会话级共享权限解析器
///
/// 每个认证会话构造一次，显式传递给所有消费方。内部使用
/// Arc 包装，Clone 成本低廉。
#[derive(Clone)]
pub struct SessionPermissions {
    inner: Arc<RwLock<ResolverState>>,
}

impl Default for SessionPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPermissions {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResolverState {
                resolver: PermissionResolver::signed_out(),
                generation: 0,
            })),
        }
    }

    /// 开始会话并解析权限集
    ///
    /// 解析顺序：登录缓存非空则直接采用；否则向后端拉取；
    /// 拉取失败降级到静态角色表。拉取期间用户身份再次变更时，
    /// 过期结果会因代数不匹配而被丢弃。
    pub async fn begin_session(&self, user: User, api: &dyn PermissionsApi) {
        let generation = {
            let mut state = self.inner.write().await;
            state.generation = state.generation.wrapping_add(1);
            state.resolver = PermissionResolver::loading_for(user.clone());
            state.generation
        };

        // 注意：拉取期间不持有锁
        let (permissions, source) = if !user.cached_permissions.is_empty() {
            (
                user.cached_permissions.iter().cloned().collect(),
                PermissionSource::LoginCache,
            )
        } else {
            match api.fetch_permissions().await {
                Ok(perms) => (perms.into_iter().collect(), PermissionSource::Backend),
                Err(e) => {
                    // 拉取失败只记录，不向上传播，降级到静态表
                    tracing::warn!(
                        role = %user.role,
                        error = %e,
                        "Permission fetch failed, falling back to static role table"
                    );
                    metrics::counter!("permission_fetch_fallback_total").increment(1);
                    (policy::role_permissions(&user.role), PermissionSource::StaticFallback)
                }
            }
        };

        let mut state = self.inner.write().await;
        if state.generation != generation {
            tracing::debug!(
                role = %user.role,
                "Stale permission resolution dropped"
            );
            return;
        }

        state.resolver.permissions = permissions;
        state.resolver.source = source;
        state.resolver.loading = false;

        metrics::counter!("permission_resolutions_total", "source" => source.as_str())
            .increment(1);
        tracing::info!(
            role = %user.role,
            source = source.as_str(),
            count = state.resolver.permissions.len(),
            "Permissions resolved"
        );
    }

    /// 清除会话（登出或认证上下文销毁）
    pub async fn clear(&self) {
        let mut state = self.inner.write().await;
        state.generation = state.generation.wrapping_add(1);
        state.resolver = PermissionResolver::signed_out();
    }

    /// 当前解析器状态的快照，守卫在每次渲染时读取
    pub async fn snapshot(&self) -> PermissionResolver {
        self.inner.read().await.resolver.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.inner.read().await.resolver.user().cloned()
    }

    /// 受保护上下文要求会话存在，缺失即接线缺陷
    pub async fn require_user(&self) -> Result<User, AppError> {
        self.current_user().await.ok_or(AppError::MissingSession)
    }

    pub async fn loading(&self) -> bool {
        self.inner.read().await.resolver.loading()
    }

    pub async fn has_permission(&self, permission: &Permission) -> bool {
        self.inner.read().await.resolver.has_permission(permission)
    }

    pub async fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.inner.read().await.resolver.has_any_permission(permissions)
    }

    pub async fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.inner.read().await.resolver.has_all_permissions(permissions)
    }

    pub async fn has_role(&self, role: &Role) -> bool {
        self.inner.read().await.resolver.has_role(role)
    }
}
