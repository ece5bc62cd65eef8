//! Token-managing façades
//!
//! [`ProxyManager`] owns the token broker and hands out [`UserProxy`] and
//! [`PosProxy`] values that acquire tokens on every call.

pub mod manager;
pub mod pos;
pub mod user;

pub use manager::ProxyManager;
pub use pos::PosProxy;
pub use user::UserProxy;
