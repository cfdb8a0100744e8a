use super::first_page;
use crate::server::{
    data::drone_position::{DronePositionRepository, SORTABLE_COLUMNS},
    model::drone_position::{CreateDronePositionParams, DronePositionFilter},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
