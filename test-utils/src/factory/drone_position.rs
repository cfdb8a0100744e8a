//! Drone position factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `drone_positions` rows.
///
/// Defaults to a point over Taipei at 120 m recorded now.
pub struct DronePositionFactory<'a> {
    db: &'a DatabaseConnection,
    drone_id: i32,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    battery_level: Option<f64>,
    recorded_at: DateTime<Utc>,
}

impl<'a> DronePositionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, drone_id: i32) -> Self {
        Self {
            db,
            drone_id,
            latitude: 25.0330,
            longitude: 121.5654,
            altitude: 120.0,
            battery_level: Some(80.0),
            recorded_at: Utc::now(),
        }
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    pub async fn build(self) -> Result<entity::drone_position::Model, DbErr> {
        entity::drone_position::ActiveModel {
            id: ActiveValue::NotSet,
            drone_id: ActiveValue::Set(self.drone_id),
            latitude: ActiveValue::Set(self.latitude),
            longitude: ActiveValue::Set(self.longitude),
            altitude: ActiveValue::Set(self.altitude),
            speed: ActiveValue::Set(Some(10.0)),
            heading: ActiveValue::Set(Some(90.0)),
            battery_level: ActiveValue::Set(self.battery_level),
            signal_strength: ActiveValue::Set(Some(95.0)),
            recorded_at: ActiveValue::Set(self.recorded_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a position with default values recorded now.
pub async fn create_position(
    db: &DatabaseConnection,
    drone_id: i32,
) -> Result<entity::drone_position::Model, DbErr> {
    DronePositionFactory::new(db, drone_id).build().await
}
