use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw pagination query string parameters.
///
/// Every field is optional; defaults and range checks are applied server-side so an
/// out-of-range value is reported as a 400 rather than silently clamped.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// One-based page number (default 1).
    pub page: Option<u64>,
    /// Items per page, 1 through 100 (default 20).
    pub page_size: Option<u64>,
    /// Column to sort by; each endpoint documents its allowed columns.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC` (default `DESC`).
    pub sort_order: Option<String>,
    /// Free-text search term.
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}
