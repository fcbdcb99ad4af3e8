use crate::models::PaginateQuery;

/// Page size used when a query does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Page served when a query does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;

/// Largest `OFFSET`/`LIMIT` the SQL drivers bind; they take signed 64-bit integers.
pub const MAX_SQL_ROWS: u64 = i64::MAX.unsigned_abs();

/// Resolved paging of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub items_per_page: u64,
    pub current_page: u64,
    /// Rows to skip (`OFFSET`), at most [`MAX_SQL_ROWS`]
    pub skip: u64,
    /// Rows to take (`LIMIT`), at most [`MAX_SQL_ROWS`]
    pub take: u64,
}

impl PaginationMeta {
    /// Apply defaults to a requested page and limit.
    ///
    /// Zero is treated like an absent value, so `current_page` and
    /// `items_per_page` are always at least 1. Both are kept as requested;
    /// only `skip` and `take` are clamped, so an absurd page is simply empty.
    #[must_use]
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let items_per_page = limit.filter(|&limit| limit > 0).unwrap_or(DEFAULT_LIMIT);
        let current_page = page.filter(|&page| page > 0).unwrap_or(DEFAULT_PAGE);

        Self {
            items_per_page,
            current_page,
            skip: (current_page - 1)
                .saturating_mul(items_per_page)
                .min(MAX_SQL_ROWS),
            take: items_per_page.min(MAX_SQL_ROWS),
        }
    }

    #[must_use]
    pub fn from_query(query: &PaginateQuery) -> Self {
        Self::new(query.page, query.limit)
    }
}

/// `ceil(total_items / items_per_page)`; zero items means zero pages.
#[must_use]
pub fn total_pages(total_items: u64, items_per_page: u64) -> u64 {
    total_items.div_ceil(items_per_page.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_absent() {
        let meta = PaginationMeta::new(None, None);
        assert_eq!(
            meta,
            PaginationMeta {
                items_per_page: DEFAULT_LIMIT,
                current_page: DEFAULT_PAGE,
                skip: 0,
                take: DEFAULT_LIMIT,
            }
        );
    }

    #[test]
    fn test_zero_is_treated_as_absent() {
        let meta = PaginationMeta::new(Some(0), Some(0));
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.items_per_page, DEFAULT_LIMIT);
    }

    #[test]
    fn test_skip_follows_page_and_limit() {
        let meta = PaginationMeta::new(Some(3), Some(25));
        assert_eq!(meta.skip, 50);
        assert_eq!(meta.take, 25);
    }

    #[test]
    fn test_skip_and_take_stay_within_sql_range() {
        let meta = PaginationMeta::new(Some(u64::MAX), Some(u64::MAX));
        assert_eq!(meta.current_page, u64::MAX);
        assert_eq!(meta.items_per_page, u64::MAX);
        assert_eq!(meta.skip, MAX_SQL_ROWS);
        assert_eq!(meta.take, MAX_SQL_ROWS);

        let meta = PaginationMeta::new(Some(1_000_000_000_000_000_000), Some(10));
        assert_eq!(meta.skip, MAX_SQL_ROWS);
        assert_eq!(meta.take, 10);
        assert!(i64::try_from(meta.skip).is_ok());
    }

    #[test]
    fn test_from_query() {
        let meta = PaginationMeta::from_query(&PaginateQuery::default().with_page(2));
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.skip, DEFAULT_LIMIT);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(25, 0), 25);
    }
}
