//! Users, roles, permissions and the two assignment tables linking them.

pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;
