use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Drone, DroneCommand};
///
/// let test = TestBuilder::new()
///     .with_table(Drone)
///     .with_table(DroneCommand)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys must be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds every table owned by the drone service.
    ///
    /// Covers drones, status archive, real-time status, positions, commands, the command
    /// queue, both archive tables and archive tasks, in dependency order.
    pub fn with_drone_tables(self) -> Self {
        self.with_table(Drone)
            .with_table(DroneStatusArchive)
            .with_table(DroneRealTimeStatus)
            .with_table(DronePosition)
            .with_table(DroneCommand)
            .with_table(DroneCommandQueue)
            .with_table(DronePositionArchive)
            .with_table(DroneCommandArchive)
            .with_table(ArchiveTask)
    }

    /// Adds users, roles, permissions and both join tables.
    pub fn with_rbac_tables(self) -> Self {
        self.with_table(User)
            .with_table(Role)
            .with_table(Permission)
            .with_table(UserRole)
            .with_table(RolePermission)
    }

    /// Adds users and user preferences.
    pub fn with_preference_tables(self) -> Self {
        self.with_table(User).with_table(UserPreference)
    }

    /// Adds every table in the application.
    ///
    /// Used by HTTP-level tests that exercise the full router.
    pub fn with_all_tables(self) -> Self {
        self.with_rbac_tables()
            .with_table(UserPreference)
            .with_drone_tables()
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
