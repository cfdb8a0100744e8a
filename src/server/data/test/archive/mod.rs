use super::{first_page, page_of};
use crate::{
    model::archive::{ArchiveTaskStatus, ArchiveTaskType},
    server::{
        data::archive::{
            command::{self as command_archive, CommandArchiveRepository},
            position::{self as position_archive, PositionArchiveRepository},
            task::{ArchiveTaskRepository, SORTABLE_COLUMNS as TASK_COLUMNS},
        },
        model::archive::{ArchiveFilter, ArchiveOutcome, ArchiveTaskFilter, CreateArchiveTaskParams},
    },
};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait, TransactionTrait};
use test_utils::{builder::TestBuilder, factory};

mod archive_range;
mod task;
