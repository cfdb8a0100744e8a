//! Wire-level DTOs and enumerations shared by every API surface.
//!
//! Everything here is plain serde data with OpenAPI schemas. Server-side domain models in
//! `server::model` convert into these at the controller boundary.

pub mod api;
pub mod archive;
pub mod command_queue;
pub mod drone;
pub mod drone_command;
pub mod drone_position;
pub mod drone_status_archive;
pub mod pagination;
pub mod rbac;
pub mod real_time_status;
pub mod system;
pub mod user_preference;
