use crate::{
    model::real_time_status::RealTimeStatus,
    server::{
        data::real_time_status::RealTimeStatusRepository,
        model::real_time_status::UpsertRealTimeStatusParams,
    },
};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod mark_offline_stale;
mod upsert;

fn snapshot(drone_id: i32, status: RealTimeStatus, battery: f64) -> UpsertRealTimeStatusParams {
    UpsertRealTimeStatusParams {
        drone_id,
        current_status: status,
        battery_level: battery,
        signal_strength: Some(80.0),
        altitude: Some(120.0),
        speed: Some(8.5),
        heading: Some(90.0),
        is_connected: true,
        error_message: None,
    }
}
