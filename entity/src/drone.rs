use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub serial: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    /// One of `active`, `inactive`, `maintenance`, `flying`.
    pub status: String,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drone_status_archive::Entity")]
    DroneStatusArchive,
    #[sea_orm(has_many = "super::drone_position::Entity")]
    DronePosition,
    #[sea_orm(has_many = "super::drone_command::Entity")]
    DroneCommand,
    #[sea_orm(has_many = "super::drone_command_queue::Entity")]
    DroneCommandQueue,
    #[sea_orm(has_one = "super::drone_real_time_status::Entity")]
    DroneRealTimeStatus,
}

impl Related<super::drone_status_archive::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DroneStatusArchive.def()
    }
}

impl Related<super::drone_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DronePosition.def()
    }
}

impl Related<super::drone_command::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DroneCommand.def()
    }
}

impl Related<super::drone_command_queue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DroneCommandQueue.def()
    }
}

impl Related<super::drone_real_time_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DroneRealTimeStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
