//! 服务模块

pub mod resolver;
pub mod session;

pub use resolver::{PermissionResolver, PermissionSource, SessionPermissions};
pub use session::SessionManager;
