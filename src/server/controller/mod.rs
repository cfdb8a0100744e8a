//! HTTP handlers.
//!
//! Controllers extract and convert request data, call the matching service and wrap the
//! result in the response envelope. Business rules live in the service layer.

pub mod archive;
pub mod command_queue;
pub mod drone;
pub mod drone_command;
pub mod drone_position;
pub mod drone_status_archive;
pub mod rbac;
pub mod real_time_status;
pub mod system;
pub mod user_preference;

#[cfg(test)]
mod test;
