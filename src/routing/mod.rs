//! 路由决策模块

pub mod dashboard;
