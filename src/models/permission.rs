//! 权限模型
//! 权限是 `resource:action` 形式的不透明字符串，目录在此封闭枚举

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// 权限标识
///
/// 线上权限字符串来自后端，形式上约定为 `resource:action`，
/// 例如 `appointments:accept`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

static PERMISSION_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z_]*:[a-z][a-z_]*$").expect("permission regex"));

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// 解析宿主提供的权限字符串，不符合 `resource:action` 约定时报错
    ///
    /// 后端返回的权限列表不经过该校验，原样采用。
    pub fn parse(s: &str) -> Result<Self, crate::error::AppError> {
        let permission = Permission::new(s.to_string());
        if !permission.is_well_formed() {
            return Err(crate::error::AppError::InvalidPermission(s.to_string()));
        }
        Ok(permission)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否符合 `resource:action` 约定
    pub fn is_well_formed(&self) -> bool {
        PERMISSION_FORMAT.is_match(&self.0)
    }

    /// `resource:action` 中的 resource 部分
    pub fn resource(&self) -> &str {
        self.0.split(':').next().unwrap_or("")
    }

    /// `resource:action` 中的 action 部分
    pub fn action(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const fn perm(s: &'static str) -> Permission {
    Permission(Cow::Borrowed(s))
}

/// 封闭权限目录
///
/// 权限字符串在此集中声明，静态角色表与守卫统一引用
/// 这些常量，不在调用点散落字面量。
pub mod catalog {
    use super::{perm, Permission};

    pub const APPOINTMENTS_VIEW: Permission = perm("appointments:view");
    pub const APPOINTMENTS_CREATE: Permission = perm("appointments:create");
    pub const APPOINTMENTS_ACCEPT: Permission = perm("appointments:accept");
    pub const APPOINTMENTS_REJECT: Permission = perm("appointments:reject");
    pub const APPOINTMENTS_UPDATE: Permission = perm("appointments:update");
    pub const APPOINTMENTS_CANCEL: Permission = perm("appointments:cancel");
    pub const PATIENTS_VIEW: Permission = perm("patients:view");
    pub const PATIENTS_MANAGE: Permission = perm("patients:manage");
    pub const PRESCRIPTIONS_VIEW: Permission = perm("prescriptions:view");
    pub const PRESCRIPTIONS_CREATE: Permission = perm("prescriptions:create");
    pub const RECORDS_VIEW: Permission = perm("records:view");
    pub const DOCTORS_VIEW: Permission = perm("doctors:view");
    pub const DOCTORS_MANAGE: Permission = perm("doctors:manage");
    pub const SERVICES_MANAGE: Permission = perm("services:manage");
    pub const STAFF_VIEW: Permission = perm("staff:view");
    pub const STAFF_INVITE: Permission = perm("staff:invite");
    pub const STAFF_MANAGE: Permission = perm("staff:manage");
    pub const LOCATIONS_VIEW: Permission = perm("locations:view");
    pub const LOCATIONS_MANAGE: Permission = perm("locations:manage");
    pub const SETTINGS_MANAGE: Permission = perm("settings:manage");
    pub const ACCESS_REQUESTS_MANAGE: Permission = perm("access_requests:manage");
}

/// 管理员被硬性禁止的预约操作权限
///
/// 业务规则：SUPER_ADMIN 与 LOCATION_ADMIN 可以查看预约，
/// 但不允许操作预约生命周期。此覆盖层凌驾于静态表与后端
/// 缓存权限之上。
pub const ADMIN_BLOCKED_APPOINTMENT_ACTIONS: [Permission; 3] = [
    catalog::APPOINTMENTS_ACCEPT,
    catalog::APPOINTMENTS_REJECT,
    catalog::APPOINTMENTS_UPDATE,
];
