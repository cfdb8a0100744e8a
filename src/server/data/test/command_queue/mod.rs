use crate::{
    model::drone_command::{CommandStatus, CommandType},
    server::{
        data::command_queue::CommandQueueRepository,
        model::{command_queue::EnqueueParams, drone_command::StatusStamp},
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_finished_before;
mod enqueue;
mod next_pending;
mod transition;
