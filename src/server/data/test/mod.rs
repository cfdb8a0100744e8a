use crate::{model::pagination::PaginationQuery, server::model::pagination::PageRequest};

mod archive;
mod command_queue;
mod drone;
mod drone_command;
mod drone_position;
mod rbac;
mod real_time_status;
mod user_preference;

/// Builds the default first page for an endpoint's sortable columns.
fn first_page(sortable: &'static [&'static str]) -> PageRequest {
    PageRequest::from_query(PaginationQuery::default(), sortable).unwrap()
}

/// Builds a page request from explicit query values.
fn page_of(
    sortable: &'static [&'static str],
    page: u64,
    page_size: u64,
    search: Option<&str>,
) -> PageRequest {
    PageRequest::from_query(
        PaginationQuery {
            page: Some(page),
            page_size: Some(page_size),
            search: search.map(str::to_string),
            ..Default::default()
        },
        sortable,
    )
    .unwrap()
}
