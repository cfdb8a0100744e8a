//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with a `Factory`
//! struct for customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let drone = factory::create_drone(&db).await?;
//! let command = factory::create_command(&db, drone.id).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let drone = factory::drone::DroneFactory::new(&db)
//!     .serial("SN-0001")
//!     .status("flying")
//!     .build()
//!     .await?;
//! ```

pub mod archive_task;
pub mod drone;
pub mod drone_command;
pub mod drone_command_queue;
pub mod drone_position;
pub mod helpers;
pub mod permission;
pub mod role;
pub mod user;
pub mod user_preference;

pub use archive_task::create_archive_task;
pub use drone::create_drone;
pub use drone_command::create_command;
pub use drone_command_queue::create_queue_entry;
pub use drone_position::create_position;
pub use permission::create_permission;
pub use role::create_role;
pub use user::create_user;
pub use user_preference::create_preference;
