//! Drone factory for creating test drone entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test drones with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let drone = DroneFactory::new(&db)
///     .serial("SN-42")
///     .status("active")
///     .build()
///     .await?;
/// ```
pub struct DroneFactory<'a> {
    db: &'a DatabaseConnection,
    serial: String,
    name: String,
    model: String,
    manufacturer: String,
    status: String,
    owner_user_id: Option<i32>,
    manufacture_year: Option<i32>,
}

impl<'a> DroneFactory<'a> {
    /// Creates a new DroneFactory with default values.
    ///
    /// Defaults:
    /// - serial: `"SN-{id}"` where id is auto-incremented
    /// - name: `"Drone {id}"`
    /// - model: `"Mavic 3"`, manufacturer: `"DJI"`
    /// - status: `"active"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            serial: format!("SN-{:06}", id),
            name: format!("Drone {}", id),
            model: "Mavic 3".to_string(),
            manufacturer: "DJI".to_string(),
            status: "active".to_string(),
            owner_user_id: None,
            manufacture_year: Some(2024),
        }
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = serial.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Sets the stored status string (`active`, `inactive`, `maintenance`, `flying`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn owner_user_id(mut self, owner_user_id: Option<i32>) -> Self {
        self.owner_user_id = owner_user_id;
        self
    }

    /// Builds and inserts the drone entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::drone::Model)` - Created drone entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::drone::Model, DbErr> {
        let now = Utc::now();
        entity::drone::ActiveModel {
            id: ActiveValue::NotSet,
            serial: ActiveValue::Set(self.serial),
            name: ActiveValue::Set(self.name),
            model: ActiveValue::Set(self.model),
            manufacturer: ActiveValue::Set(self.manufacturer),
            status: ActiveValue::Set(self.status),
            owner_user_id: ActiveValue::Set(self.owner_user_id),
            manufacture_year: ActiveValue::Set(self.manufacture_year),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active drone with default values.
///
/// Shorthand for `DroneFactory::new(db).build().await`.
pub async fn create_drone(db: &DatabaseConnection) -> Result<entity::drone::Model, DbErr> {
    DroneFactory::new(db).build().await
}
