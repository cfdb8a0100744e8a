use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{model::pagination::PaginationQuery, server::model::pagination::PageRequest};

mod archive;
mod command_queue;
mod drone;
mod drone_position;
mod rbac;
mod real_time_status;
mod user_preference;

async fn drone_context() -> TestContext {
    TestBuilder::new().with_drone_tables().build().await.unwrap()
}

fn db(test: &TestContext) -> &DatabaseConnection {
    test.db.as_ref().unwrap()
}

fn first_page(sortable: &'static [&'static str]) -> PageRequest {
    PageRequest::from_query(PaginationQuery::default(), sortable).unwrap()
}
