//! 守卫模块
//! 基于解析器状态决定路由子树与操作按钮的呈现

pub mod action;
pub mod route;

pub use action::{ActionGuard, ActionState, ButtonModel};
pub use route::{RouteDecision, RouteGuard};
