//! 路由守卫
//! 包裹受保护子树，按角色/权限要求决定呈现结果

use crate::{
    models::{permission::Permission, role::Role},
    services::resolver::PermissionResolver,
};

/// 权限拒绝时的默认提示文案
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// 角色拒绝且未提供回退视图时的默认跳转落点
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// 守卫评估结果
///
/// 角色失败与权限失败刻意走不同的拒绝形态：前者跳转，
/// 后者原地呈现拒绝面板。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// 权限解析中，挂起可见内容
    Loading,
    /// 未认证，跳转登录页
    RedirectToLogin,
    /// 角色不满足，跳转到指定落点（替换历史）
    Redirect(String),
    /// 呈现调用方提供的回退视图
    Fallback,
    /// 权限不满足，原地呈现拒绝面板
    AccessDenied,
    /// 所有检查通过，呈现子树
    Render,
}

/// 路由守卫配置
///
/// 各项要求相互独立且叠加生效：同时指定角色与权限时两者都
/// 必须通过。什么都不指定等于不设限制。
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    required_roles: Vec<Role>,
    required_permission: Option<Permission>,
    required_any_permissions: Option<Vec<Permission>>,
    has_fallback: bool,
    redirect_to: Option<String>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 管理后台入口：三种管理角色任一
    pub fn admin_only() -> Self {
        Self::new().require_any_role(Role::ADMIN_ROLES.to_vec())
    }

    /// 仅限超管
    pub fn super_admin_only() -> Self {
        Self::new().require_role(Role::SuperAdmin)
    }

    /// 诊所工作台：一线运营角色加三种管理角色
    pub fn staff_only() -> Self {
        let mut roles = Role::OPERATIONAL_ROLES.to_vec();
        roles.extend(Role::ADMIN_ROLES);
        Self::new().require_any_role(roles)
    }

    pub fn require_role(mut self, role: Role) -> Self {
        self.required_roles = vec![role];
        self
    }

    pub fn require_any_role(mut self, roles: Vec<Role>) -> Self {
        self.required_roles = roles;
        self
    }

    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    pub fn require_any_permission(mut self, permissions: Vec<Permission>) -> Self {
        self.required_any_permissions = Some(permissions);
        self
    }

    /// 调用方提供回退视图，拒绝时呈现它而非跳转/面板
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }

    /// 评估守卫，每次渲染调用一次
    pub fn evaluate(&self, resolver: &PermissionResolver) -> RouteDecision {
        if resolver.loading() {
            return RouteDecision::Loading;
        }

        if resolver.user().is_none() {
            return RouteDecision::RedirectToLogin;
        }

        if !self.required_roles.is_empty() && !resolver.has_any_role(&self.required_roles) {
            return if self.has_fallback {
                RouteDecision::Fallback
            } else {
                let target = self
                    .redirect_to
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REDIRECT.to_string());
                RouteDecision::Redirect(target)
            };
        }

        if let Some(permission) = &self.required_permission {
            if !resolver.has_permission(permission) {
                return self.denied();
            }
        }

        if let Some(permissions) = &self.required_any_permissions {
            if !resolver.has_any_permission(permissions) {
                return self.denied();
            }
        }

        RouteDecision::Render
    }

    fn denied(&self) -> RouteDecision {
        if self.has_fallback {
            RouteDecision::Fallback
        } else {
            RouteDecision::AccessDenied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{permission::catalog, user::User};
    use crate::services::resolver::PermissionSource;
    use std::collections::HashSet;

    fn resolver_for(role: Role, perms: &[Permission]) -> PermissionResolver {
        PermissionResolver::resolved(
            User::with_role(role),
            perms.iter().cloned().collect::<HashSet<_>>(),
            PermissionSource::Backend,
        )
    }

    /// 测试解析中挂起内容
    #[test]
    fn test_loading_suspends() {
        let resolver = PermissionResolver::loading_for(User::with_role(Role::Doctor));
        let guard = RouteGuard::new().require_role(Role::Doctor);
        assert_eq!(guard.evaluate(&resolver), RouteDecision::Loading);
    }

    /// 测试未认证跳转登录页
    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let resolver = PermissionResolver::signed_out();
        let guard = RouteGuard::new();
        assert_eq!(guard.evaluate(&resolver), RouteDecision::RedirectToLogin);
    }

    /// 测试什么都不要求即放行
    #[test]
    fn test_no_requirements_renders() {
        let resolver = resolver_for(Role::User, &[]);
        assert_eq!(RouteGuard::new().evaluate(&resolver), RouteDecision::Render);
    }

    /// 测试角色失败默认跳转通用看板
    #[test]
    fn test_role_failure_redirects_to_default() {
        let resolver = resolver_for(Role::Doctor, &[]);
        let guard = RouteGuard::new().require_role(Role::SuperAdmin);
        assert_eq!(
            guard.evaluate(&resolver),
            RouteDecision::Redirect(DEFAULT_REDIRECT.to_string())
        );
    }

    /// 测试角色失败优先走回退视图
    #[test]
    fn test_role_failure_prefers_fallback() {
        let resolver = resolver_for(Role::Doctor, &[]);
        let guard = RouteGuard::new().require_role(Role::SuperAdmin).with_fallback();
        assert_eq!(guard.evaluate(&resolver), RouteDecision::Fallback);
    }

    /// 测试权限失败呈现拒绝面板而非跳转
    #[test]
    fn test_permission_failure_is_access_denied() {
        let resolver = resolver_for(Role::Assistant, &[catalog::RECORDS_VIEW]);
        let guard = RouteGuard::new().require_permission(catalog::SETTINGS_MANAGE);
        assert_eq!(guard.evaluate(&resolver), RouteDecision::AccessDenied);
    }

    /// 测试角色与权限叠加，两者都须通过
    #[test]
    fn test_checks_are_additive() {
        let resolver = resolver_for(Role::Receptionist, &[catalog::APPOINTMENTS_VIEW]);

        let guard = RouteGuard::new()
            .require_role(Role::Receptionist)
            .require_permission(catalog::APPOINTMENTS_VIEW);
        assert_eq!(guard.evaluate(&resolver), RouteDecision::Render);

        let guard = RouteGuard::new()
            .require_role(Role::Receptionist)
            .require_permission(catalog::SETTINGS_MANAGE);
        assert_eq!(guard.evaluate(&resolver), RouteDecision::AccessDenied);
    }

    /// 测试 any-of 权限列表为空不通过
    #[test]
    fn test_empty_any_permission_list_denies() {
        let resolver = resolver_for(Role::Receptionist, &[catalog::APPOINTMENTS_VIEW]);
        let guard = RouteGuard::new().require_any_permission(vec![]);
        assert_eq!(guard.evaluate(&resolver), RouteDecision::AccessDenied);
    }

    /// 测试三个预置守卫的角色集
    #[test]
    fn test_shorthand_variants() {
        let admin = resolver_for(Role::ClinicAdmin, &[]);
        let doctor = resolver_for(Role::Doctor, &[]);
        let patient = resolver_for(Role::User, &[]);

        assert_eq!(RouteGuard::admin_only().evaluate(&admin), RouteDecision::Render);
        assert!(matches!(
            RouteGuard::admin_only().evaluate(&doctor),
            RouteDecision::Redirect(_)
        ));

        assert!(matches!(
            RouteGuard::super_admin_only().evaluate(&admin),
            RouteDecision::Redirect(_)
        ));

        assert_eq!(RouteGuard::staff_only().evaluate(&doctor), RouteDecision::Render);
        assert_eq!(RouteGuard::staff_only().evaluate(&admin), RouteDecision::Render);
        assert!(matches!(
            RouteGuard::staff_only().evaluate(&patient),
            RouteDecision::Redirect(_)
        ));
    }

    /// 测试自定义跳转落点
    #[test]
    fn test_custom_redirect_target() {
        let resolver = resolver_for(Role::User, &[]);
        let guard = RouteGuard::new()
            .require_role(Role::SuperAdmin)
            .redirect_to("/patient/dashboard");
        assert_eq!(
            guard.evaluate(&resolver),
            RouteDecision::Redirect("/patient/dashboard".to_string())
        );
    }
}
