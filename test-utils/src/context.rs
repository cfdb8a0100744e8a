use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};

use crate::error::TestError;

/// Per-test database holder.
///
/// Each context owns its own in-memory SQLite database, so tests never see each other's
/// rows. The connection is opened on first use.
pub struct TestContext {
    /// `None` until `database()` or `TestBuilder::build()` opens it.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Returns the database, opening it on first call.
    ///
    /// The pool holds a single connection: every connection to `sqlite::memory:` is a
    /// separate database, and services that open a transaction must see the same rows
    /// as the repositories around them.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            let mut opt = ConnectOptions::new("sqlite::memory:");
            opt.max_connections(1).min_connections(1).sqlx_logging(false);

            self.db = Some(Database::connect(opt).await?);
        }

        self.db.as_ref().ok_or(TestError::NotConnected)
    }

    /// Runs the given CREATE TABLE statements in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
