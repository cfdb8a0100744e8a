use sea_orm::entity::prelude::*;

/// Historical copy of a `drone_positions` row moved out by an archive task.
///
/// Carries no foreign key so archived rows outlive the drone they describe.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drone_positions_archive")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_id: i32,
    pub drone_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub battery_level: Option<f64>,
    pub signal_strength: Option<f64>,
    pub recorded_at: DateTimeUtc,
    pub archived_at: DateTimeUtc,
    pub archive_batch_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
