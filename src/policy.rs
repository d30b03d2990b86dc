//! 静态角色权限表
//! 权限拉取失败时的回退来源，进程级只读

use crate::models::{
    permission::{catalog::*, Permission},
    role::Role,
};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// 角色 → 权限集合
///
/// SUPER_ADMIN 不在表中：解析器对其做全量放行（预约操作
/// 除外），从不查表。未知角色解析为空集。
static ROLE_PERMISSIONS: Lazy<HashMap<Role, HashSet<Permission>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        Role::LocationAdmin,
        HashSet::from([
            APPOINTMENTS_VIEW,
            PATIENTS_VIEW,
            DOCTORS_VIEW,
            DOCTORS_MANAGE,
            SERVICES_MANAGE,
            STAFF_VIEW,
            STAFF_INVITE,
            STAFF_MANAGE,
            LOCATIONS_VIEW,
            LOCATIONS_MANAGE,
            SETTINGS_MANAGE,
            ACCESS_REQUESTS_MANAGE,
        ]),
    );

    // 遗留单机构管理员，能力与 LOCATION_ADMIN 一致
    table.insert(
        Role::ClinicAdmin,
        HashSet::from([
            APPOINTMENTS_VIEW,
            PATIENTS_VIEW,
            DOCTORS_VIEW,
            DOCTORS_MANAGE,
            SERVICES_MANAGE,
            STAFF_VIEW,
            STAFF_INVITE,
            STAFF_MANAGE,
            LOCATIONS_VIEW,
            LOCATIONS_MANAGE,
            SETTINGS_MANAGE,
            ACCESS_REQUESTS_MANAGE,
        ]),
    );

    table.insert(
        Role::Receptionist,
        HashSet::from([
            APPOINTMENTS_VIEW,
            APPOINTMENTS_CREATE,
            APPOINTMENTS_ACCEPT,
            APPOINTMENTS_REJECT,
            APPOINTMENTS_UPDATE,
            APPOINTMENTS_CANCEL,
            PATIENTS_VIEW,
            PATIENTS_MANAGE,
            DOCTORS_VIEW,
            STAFF_VIEW,
        ]),
    );

    table.insert(
        Role::Doctor,
        HashSet::from([
            APPOINTMENTS_VIEW,
            APPOINTMENTS_ACCEPT,
            APPOINTMENTS_REJECT,
            APPOINTMENTS_UPDATE,
            PATIENTS_VIEW,
            PRESCRIPTIONS_VIEW,
            PRESCRIPTIONS_CREATE,
            RECORDS_VIEW,
        ]),
    );

    table.insert(
        Role::Assistant,
        HashSet::from([
            APPOINTMENTS_VIEW,
            APPOINTMENTS_UPDATE,
            PATIENTS_VIEW,
            RECORDS_VIEW,
        ]),
    );

    // 患者
    table.insert(
        Role::User,
        HashSet::from([
            APPOINTMENTS_VIEW,
            APPOINTMENTS_CREATE,
            APPOINTMENTS_CANCEL,
            PRESCRIPTIONS_VIEW,
            RECORDS_VIEW,
            DOCTORS_VIEW,
            LOCATIONS_VIEW,
        ]),
    );

    table
});

/// 查询角色的静态权限集，未知角色返回空集
pub fn role_permissions(role: &Role) -> HashSet<Permission> {
    ROLE_PERMISSIONS.get(role).cloned().unwrap_or_default()
}
