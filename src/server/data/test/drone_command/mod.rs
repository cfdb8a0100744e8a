use super::page_of;
use crate::{
    model::drone_command::{CommandStatus, CommandType},
    server::{
        data::drone_command::{DroneCommandRepository, SORTABLE_COLUMNS},
        model::drone_command::{CreateDroneCommandParams, DroneCommandFilter, StatusStamp},
    },
};
use chrono::Utc;
use sea_orm::DbErr;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod count;
mod create;
mod get_paginated;
mod update_status;
