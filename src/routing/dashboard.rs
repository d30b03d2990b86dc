//! 登录后落点路由决策
//! 按角色与机构数量决定首页，每个用户对象只执行一次

use crate::models::{role::Role, user::User};
use std::fmt;

/// 落点路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    /// 全局看板（多机构视角）
    GlobalDashboard,
    /// 指定机构的看板
    LocationDashboard(String),
    DoctorDashboard,
    StaffDashboard,
    PatientDashboard,
    /// 后端 redirect_to 指定的路径，原样透传
    External(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::GlobalDashboard => "/dashboard".to_string(),
            Route::LocationDashboard(id) => format!("/location/{}/dashboard", id),
            Route::DoctorDashboard => "/doctor/dashboard".to_string(),
            Route::StaffDashboard => "/staff/dashboard".to_string(),
            Route::PatientDashboard => "/patient/dashboard".to_string(),
            Route::External(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 导航接口
///
/// 落点决策总是替换历史记录，回退不会回到决策点。
pub trait Navigator {
    fn replace(&self, path: &str);
}

/// 落点决策树，首个命中分支生效，对所有输入组合均有唯一结果
pub fn resolve_landing(user: Option<&User>) -> Route {
    let Some(user) = user else {
        return Route::Login;
    };

    // 后端跳转指令优先于所有角色规则
    if let Some(path) = user.redirect_override() {
        return Route::External(path.to_string());
    }

    match &user.role {
        Role::SuperAdmin => {
            if user.location_count > 1 {
                Route::GlobalDashboard
            } else if let Some(id) = &user.primary_location_id {
                Route::LocationDashboard(id.clone())
            } else {
                Route::GlobalDashboard
            }
        }
        Role::LocationAdmin => {
            if let Some(id) = &user.primary_location_id {
                Route::LocationDashboard(id.clone())
            } else if let Some(first) = user.assigned_location_ids.first() {
                Route::LocationDashboard(first.clone())
            } else {
                Route::GlobalDashboard
            }
        }
        Role::Doctor => Route::DoctorDashboard,
        Role::Receptionist | Role::Assistant => Route::StaffDashboard,
        // 遗留角色与超管默认落点一致
        Role::ClinicAdmin => Route::GlobalDashboard,
        Role::User | Role::Unknown(_) => Route::PatientDashboard,
    }
}

/// 决策并发出一次历史替换导航
pub fn dispatch(user: Option<&User>, navigator: &dyn Navigator) -> Route {
    let route = resolve_landing(user);

    tracing::info!(
        role = user.map(|u| u.role.as_str()).unwrap_or("-"),
        route = %route,
        "Dashboard navigation"
    );
    metrics::counter!("dashboard_navigations_total").increment(1);

    navigator.replace(&route.path());
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试无用户跳转登录页
    #[test]
    fn test_no_user_goes_to_login() {
        assert_eq!(resolve_landing(None), Route::Login);
    }

    /// 测试 redirect_to 覆盖所有角色规则
    #[test]
    fn test_redirect_override_wins() {
        let mut user = User::with_role(Role::Doctor);
        user.redirect_to = Some("/onboarding".to_string());
        let route = resolve_landing(Some(&user));
        assert_eq!(route, Route::External("/onboarding".to_string()));
        assert_eq!(route.path(), "/onboarding");
    }

    /// 测试多机构超管走全局看板，即使没有主机构
    #[test]
    fn test_super_admin_multi_location_global() {
        let mut user = User::with_role(Role::SuperAdmin);
        user.location_count = 3;
        assert_eq!(resolve_landing(Some(&user)), Route::GlobalDashboard);
    }

    /// 测试单机构超管落到主机构看板
    #[test]
    fn test_super_admin_single_location() {
        let mut user = User::with_role(Role::SuperAdmin);
        user.location_count = 1;
        user.primary_location_id = Some("loc-3".to_string());
        assert_eq!(
            resolve_landing(Some(&user)),
            Route::LocationDashboard("loc-3".to_string())
        );
    }

    /// 测试机构管理员无主机构时取首个分配机构
    #[test]
    fn test_location_admin_first_assigned() {
        let mut user = User::with_role(Role::LocationAdmin);
        user.assigned_location_ids = vec!["loc-7".to_string(), "loc-9".to_string()];
        let route = resolve_landing(Some(&user));
        assert_eq!(route, Route::LocationDashboard("loc-7".to_string()));
        assert_eq!(route.path(), "/location/loc-7/dashboard");
    }

    /// 测试路由路径渲染
    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::GlobalDashboard.path(), "/dashboard");
        assert_eq!(Route::DoctorDashboard.path(), "/doctor/dashboard");
        assert_eq!(Route::StaffDashboard.path(), "/staff/dashboard");
        assert_eq!(Route::PatientDashboard.path(), "/patient/dashboard");
        assert_eq!(
            Route::LocationDashboard("loc-1".to_string()).path(),
            "/location/loc-1/dashboard"
        );
    }
}
