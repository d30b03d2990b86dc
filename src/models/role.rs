//! 角色模型
//! 后端以 SCREAMING_SNAKE 字符串传输角色，内部使用封闭枚举

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 用户角色
///
/// `ClinicAdmin` 是历史遗留角色，行为上等同于单机构管理员，
/// 仅为兼容旧账号保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    LocationAdmin,
    ClinicAdmin,
    Receptionist,
    Doctor,
    Assistant,
    /// 患者账号
    User,
    /// 未知角色（线上曾出现过手工写入的角色值）
    /// 解析为空权限集，跳转到患者首页
    Unknown(String),
}

impl Role {
    /// 从线上字符串解析角色，未知值不视为错误
    pub fn from_wire(s: &str) -> Role {
        match s {
            "SUPER_ADMIN" => Role::SuperAdmin,
            "LOCATION_ADMIN" => Role::LocationAdmin,
            "CLINIC_ADMIN" => Role::ClinicAdmin,
            "RECEPTIONIST" => Role::Receptionist,
            "DOCTOR" => Role::Doctor,
            "ASSISTANT" => Role::Assistant,
            "USER" => Role::User,
            other => Role::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::LocationAdmin => "LOCATION_ADMIN",
            Role::ClinicAdmin => "CLINIC_ADMIN",
            Role::Receptionist => "RECEPTIONIST",
            Role::Doctor => "DOCTOR",
            Role::Assistant => "ASSISTANT",
            Role::User => "USER",
            Role::Unknown(s) => s,
        }
    }

    /// 管理类角色（含遗留 CLINIC_ADMIN）
    pub const ADMIN_ROLES: [Role; 3] = [Role::SuperAdmin, Role::LocationAdmin, Role::ClinicAdmin];

    /// 一线运营角色
    pub const OPERATIONAL_ROLES: [Role; 3] = [Role::Receptionist, Role::Doctor, Role::Assistant];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleVisitor;

        impl de::Visitor<'_> for RoleVisitor {
            type Value = Role;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a role string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Role, E> {
                Ok(Role::from_wire(v))
            }
        }

        deserializer.deserialize_str(RoleVisitor)
    }
}
