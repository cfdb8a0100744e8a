use axum_test::TestServer;
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::server::{config::Config, router, state::AppState};

mod drone;

/// Serves the full router, docs and layers included, over the test database.
fn server(test: &TestContext) -> TestServer {
    let db = test.db.clone().unwrap();
    let config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "ENABLE_SCHEDULER" => Some("false".to_string()),
        _ => None,
    })
    .unwrap();

    TestServer::new(router::router(AppState::new(db, 300), &config)).unwrap()
}

async fn drone_server() -> (TestContext, TestServer) {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let server = server(&test);
    (test, server)
}

async fn full_server() -> (TestContext, TestServer) {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let server = server(&test);
    (test, server)
}
