use super::{first_page, page_of};
use crate::{
    model::drone::DroneStatus,
    server::{
        data::drone::{DroneRepository, SORTABLE_COLUMNS},
        model::drone::{CreateDroneParams, DroneFilter, UpdateDroneParams},
    },
};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod count_by_status;
mod create;
mod delete;
mod get_paginated;
mod update;

fn params(serial: &str) -> CreateDroneParams {
    CreateDroneParams {
        serial: serial.to_string(),
        name: "Scout".to_string(),
        model: "Mavic 3".to_string(),
        manufacturer: "DJI".to_string(),
        status: DroneStatus::Inactive,
        owner_user_id: None,
        manufacture_year: Some(2024),
    }
}
