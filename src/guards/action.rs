//! 操作守卫
//! 按钮级别的能力门控：隐藏、禁用加锁、点击抑制

use crate::{
    models::{permission::Permission, role::Role},
    services::resolver::PermissionResolver,
};

/// 无权限时的默认提示文案
pub const DEFAULT_DENIAL_REASON: &str = "You do not have permission to perform this action";

/// 操作守卫配置
///
/// 同时指定权限与角色时两者都必须通过。什么都不指定等于
/// 不设限制。
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    required_permission: Option<Permission>,
    required_roles: Vec<Role>,
    hide_if_no_permission: bool,
    disabled: bool,
    denial_reason: Option<String>,
}

/// 操作守卫的呈现结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    /// 无权限且要求隐藏：不渲染任何节点
    Hidden,
    Button(ButtonModel),
}

/// 按钮呈现模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonModel {
    enabled: bool,
    /// 无权限时显示锁形图标
    show_lock: bool,
    /// 悬停提示，仅在禁用且无权限时出现
    tooltip: Option<String>,
}

impl ButtonModel {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn show_lock(&self) -> bool {
        self.show_lock
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// 点击按钮：禁用时抑制事件，处理器不会被调用
    ///
    /// 返回处理器是否被调用。
    pub fn click<F: FnOnce()>(&self, on_click: F) -> bool {
        if !self.enabled {
            return false;
        }
        on_click();
        true
    }
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    pub fn require_role(mut self, role: Role) -> Self {
        self.required_roles = vec![role];
        self
    }

    pub fn require_any_role(mut self, roles: Vec<Role>) -> Self {
        self.required_roles = roles;
        self
    }

    /// 无权限时整体隐藏而非禁用
    pub fn hide_if_no_permission(mut self) -> Self {
        self.hide_if_no_permission = true;
        self
    }

    /// 调用方自身的禁用态，与权限判断按 OR 叠加
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn denial_reason(mut self, reason: impl Into<String>) -> Self {
        self.denial_reason = Some(reason.into());
        self
    }

    /// 评估守卫，得到按钮的呈现结果
    pub fn evaluate(&self, resolver: &PermissionResolver) -> ActionState {
        let permission_ok = self
            .required_permission
            .as_ref()
            .map(|p| resolver.has_permission(p))
            .unwrap_or(true);
        let role_ok =
            self.required_roles.is_empty() || resolver.has_any_role(&self.required_roles);
        let has_access = permission_ok && role_ok;

        if !has_access && self.hide_if_no_permission {
            return ActionState::Hidden;
        }

        let tooltip = if !has_access {
            Some(
                self.denial_reason
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DENIAL_REASON.to_string()),
            )
        } else {
            None
        };

        ActionState::Button(ButtonModel {
            enabled: has_access && !self.disabled,
            show_lock: !has_access,
            tooltip,
        })
    }
}
