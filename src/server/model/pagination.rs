//! Validated pagination parameters and paged results.

use sea_orm::Order;

use crate::{
    model::pagination::{PaginatedDto, PaginationQuery, SortOrder},
    server::error::validation::ValidationError,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_SEARCH_LEN: usize = 100;

/// Pagination request after defaults and range checks have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: u64,
    pub page_size: u64,
    /// Always one of the columns the endpoint allows sorting by.
    pub sort_by: &'static str,
    pub sort_order: SortOrder,
    /// Trimmed search term; `None` when absent or blank.
    pub search: Option<String>,
}

impl PageRequest {
    /// Validates raw query parameters against the endpoint's sortable columns.
    ///
    /// The first entry of `sortable` is the default sort column. `sortBy` accepts either
    /// the snake_case column name or its camelCase form.
    ///
    /// # Returns
    /// - `Ok(PageRequest)` - Parameters within range
    /// - `Err(ValidationError)` - Page below 1 or with an offset past `i64::MAX`, page size
    ///   outside 1..=100, unknown sort column or order, or search term over 100 characters
    pub fn from_query(
        query: PaginationQuery,
        sortable: &'static [&'static str],
    ) -> Result<Self, ValidationError> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(ValidationError::new("page", "must be at least 1"));
        }

        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ValidationError::new(
                "pageSize",
                format!("must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }

        // The paginator multiplies page index by page size for the OFFSET.
        let offset = (page - 1).checked_mul(page_size);
        if !offset.is_some_and(|offset| offset <= i64::MAX as u64) {
            return Err(ValidationError::new("page", "is too large"));
        }

        let sort_by = match query.sort_by.as_deref().map(str::trim) {
            None | Some("") => sortable.first().copied().unwrap_or("id"),
            Some(requested) => sortable
                .iter()
                .copied()
                .find(|column| *column == requested || to_camel_case(column) == requested)
                .ok_or_else(|| {
                    ValidationError::new(
                        "sortBy",
                        format!("must be one of: {}", sortable.join(", ")),
                    )
                })?,
        };

        let sort_order = match query.sort_order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::Desc,
            Some(order) if order.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            Some(_) => return Err(ValidationError::new("sortOrder", "must be ASC or DESC")),
        };

        let search = match query.search.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(term) if term.chars().count() > MAX_SEARCH_LEN => {
                return Err(ValidationError::new(
                    "search",
                    format!("must be at most {} characters", MAX_SEARCH_LEN),
                ))
            }
            Some(term) => Some(term.to_string()),
        };

        Ok(Self {
            page,
            page_size,
            sort_by,
            sort_order,
            search,
        })
    }

    /// Zero-based page index for the SeaORM paginator.
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }

    /// SeaORM sort direction for the requested order.
    pub fn order(&self) -> Order {
        match self.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// One page of results plus the totals needed to build navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Paginated<T> {
    /// Wraps one page of items loaded for `request`.
    ///
    /// # Arguments
    /// - `items` - Rows of the requested page
    /// - `total` - Row count across all pages
    /// - `request` - Request the page was loaded for
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Number of pages needed for `total` rows; 0 when nothing matched.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    /// Converts every item and attaches the navigation fields.
    pub fn into_dto<U, F>(self, f: F) -> PaginatedDto<U>
    where
        F: FnMut(T) -> U,
    {
        let total_pages = self.total_pages();
        PaginatedDto {
            data: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTABLE: &[&str] = &["created_at", "name", "id"];

    fn query() -> PaginationQuery {
        PaginationQuery::default()
    }

    #[test]
    fn applies_defaults() {
        let request = PageRequest::from_query(query(), SORTABLE).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 20);
        assert_eq!(request.sort_by, "created_at");
        assert_eq!(request.sort_order, SortOrder::Desc);
        assert_eq!(request.search, None);
        assert_eq!(request.page_index(), 0);
    }

    #[test]
    fn rejects_page_zero() {
        let err = PageRequest::from_query(
            PaginationQuery {
                page: Some(0),
                ..query()
            },
            SORTABLE,
        )
        .unwrap_err();
        assert_eq!(err.field, "page");
    }

    #[test]
    fn rejects_page_with_unrepresentable_offset() {
        for page in [u64::MAX, i64::MAX as u64] {
            let err = PageRequest::from_query(
                PaginationQuery {
                    page: Some(page),
                    page_size: Some(20),
                    ..query()
                },
                SORTABLE,
            )
            .unwrap_err();
            assert_eq!(err.field, "page");
        }
    }

    #[test]
    fn accepts_largest_page_that_fits() {
        let page = i64::MAX as u64 / 100 + 1;
        let request = PageRequest::from_query(
            PaginationQuery {
                page: Some(page),
                page_size: Some(100),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        assert_eq!(request.page, page);
    }

    #[test]
    fn rejects_page_size_out_of_range() {
        for size in [0, 101] {
            let err = PageRequest::from_query(
                PaginationQuery {
                    page_size: Some(size),
                    ..query()
                },
                SORTABLE,
            )
            .unwrap_err();
            assert_eq!(err.field, "pageSize");
        }
    }

    #[test]
    fn accepts_page_size_bounds() {
        for size in [1, 100] {
            let request = PageRequest::from_query(
                PaginationQuery {
                    page_size: Some(size),
                    ..query()
                },
                SORTABLE,
            )
            .unwrap();
            assert_eq!(request.page_size, size);
        }
    }

    #[test]
    fn rejects_unknown_sort_column() {
        let err = PageRequest::from_query(
            PaginationQuery {
                sort_by: Some("password".to_string()),
                ..query()
            },
            SORTABLE,
        )
        .unwrap_err();
        assert_eq!(err.field, "sortBy");
    }

    #[test]
    fn accepts_camel_case_sort_column() {
        let request = PageRequest::from_query(
            PaginationQuery {
                sort_by: Some("createdAt".to_string()),
                sort_order: Some("asc".to_string()),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        assert_eq!(request.sort_by, "created_at");
        assert_eq!(request.sort_order, SortOrder::Asc);
    }

    #[test]
    fn rejects_unknown_sort_order() {
        let err = PageRequest::from_query(
            PaginationQuery {
                sort_order: Some("sideways".to_string()),
                ..query()
            },
            SORTABLE,
        )
        .unwrap_err();
        assert_eq!(err.field, "sortOrder");
    }

    #[test]
    fn trims_and_limits_search() {
        let request = PageRequest::from_query(
            PaginationQuery {
                search: Some("   ".to_string()),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        assert_eq!(request.search, None);

        let request = PageRequest::from_query(
            PaginationQuery {
                search: Some("  falcon ".to_string()),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        assert_eq!(request.search.as_deref(), Some("falcon"));

        let err = PageRequest::from_query(
            PaginationQuery {
                search: Some("x".repeat(101)),
                ..query()
            },
            SORTABLE,
        )
        .unwrap_err();
        assert_eq!(err.field, "search");
    }

    #[test]
    fn computes_navigation() {
        let request = PageRequest::from_query(
            PaginationQuery {
                page: Some(2),
                page_size: Some(10),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        let dto = Paginated::new(vec![1, 2, 3], 25, &request).into_dto(|n| n * 10);

        assert_eq!(dto.data, vec![10, 20, 30]);
        assert_eq!(dto.total_pages, 3);
        assert!(dto.has_next);
        assert!(dto.has_prev);
    }

    #[test]
    fn page_past_end_keeps_totals() {
        let request = PageRequest::from_query(
            PaginationQuery {
                page: Some(9),
                page_size: Some(10),
                ..query()
            },
            SORTABLE,
        )
        .unwrap();
        let dto = Paginated::<i32>::new(Vec::new(), 25, &request).into_dto(|n| n);

        assert!(dto.data.is_empty());
        assert_eq!(dto.total, 25);
        assert_eq!(dto.total_pages, 3);
        assert!(!dto.has_next);
        assert!(dto.has_prev);
    }
}
