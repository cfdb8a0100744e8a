//! Test harness for the AIOT backend.
//!
//! `TestBuilder` picks which tables a test needs and returns a `TestContext` holding a
//! private in-memory SQLite database with those tables created. The `factory` module
//! inserts drones, commands, queue entries, archive tasks, users, roles, permissions and
//! preferences with defaults so a test only spells out the fields it asserts on.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_drone_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_drone_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let drone = test_utils::factory::create_drone(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
