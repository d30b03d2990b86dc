//! MediConnect 访问决策层
//! 提供角色/权限解析、路由与操作守卫、登录后跳转决策

pub mod client;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;
pub mod policy;
pub mod routing;
pub mod services;
pub mod telemetry;
