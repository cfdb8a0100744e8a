//! SeaORM entity definitions for every table in the AIOT backend.
//!
//! Tables are created by the `migration` crate; these entities mirror those schemas and are
//! also used by `test-utils` to build in-memory SQLite schemas for tests.

pub mod prelude;

pub mod archive_task;
pub mod drone;
pub mod drone_command;
pub mod drone_command_archive;
pub mod drone_command_queue;
pub mod drone_position;
pub mod drone_position_archive;
pub mod drone_real_time_status;
pub mod drone_status_archive;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_preference;
pub mod user_role;
