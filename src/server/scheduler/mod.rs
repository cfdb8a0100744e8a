//! Background cron jobs.

pub mod maintenance;
