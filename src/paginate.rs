use serde::Serialize;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::filter::filter_options;
use crate::models::{FilterMap, PaginateQuery};
use crate::pagination::{PaginationMeta, total_pages};
use crate::query_string::serialize_query;
use crate::search::search_options_for;
use crate::sort::SortBy;

/// Paginated response returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginatedMeta,
    pub links: PaginatedLinks,
}

/// Page metadata, echoing the query the server accepted.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedMeta {
    pub items_per_page: u64,
    pub total_items: u64,
    pub current_page: u64,
    pub total_pages: u64,
    #[schema(value_type = Option<String>, example = "createdAt:DESC")]
    pub sort_by: Option<SortBy>,
    /// Accepted search term, `""` when there was none
    pub search: String,
    pub select: Vec<String>,
    /// Accepted filters; absent when nothing was filtered
    #[schema(value_type = Option<Object>)]
    pub filter: Option<FilterMap>,
}

impl PaginatedMeta {
    /// Rebuild the query that produced this page.
    ///
    /// Feeding the result back through the codecs gives the same predicates,
    /// sort, page and limit as the original request.
    #[must_use]
    pub fn to_query(&self) -> PaginateQuery {
        PaginateQuery {
            page: Some(self.current_page),
            limit: Some(self.items_per_page),
            sort_by: self.sort_by.clone(),
            search: Some(self.search.clone()).filter(|search| !search.is_empty()),
            filter: self.filter.clone(),
            select: Some(self.select.clone()).filter(|select| !select.is_empty()),
            path: None,
        }
    }
}

/// Navigation links; a link is present only when that page exists.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginatedLinks {
    pub first: Option<String>,
    pub previous: Option<String>,
    pub current: String,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl<T> Paginated<T> {
    /// Compose the envelope for one page of results.
    ///
    /// `total_items` counts every record matching the query, not just `data`.
    /// Search is echoed as the trimmed term accepted over the product field set;
    /// use [`Paginated::with_search_fields`] for resources searched differently.
    pub fn new(query: &PaginateQuery, data: Vec<T>, total_items: u64) -> Self {
        Self::with_search_fields(query, data, total_items, crate::search::PRODUCT_SEARCH_FIELDS)
    }

    /// Like [`Paginated::new`] for a resource whose search covers `search_fields`.
    ///
    /// An empty field set means the resource is not searchable and the search
    /// term is not echoed.
    pub fn with_search_fields(
        query: &PaginateQuery,
        data: Vec<T>,
        total_items: u64,
        search_fields: &[&str],
    ) -> Self {
        let paging = PaginationMeta::from_query(query);
        let total_pages = total_pages(total_items, paging.items_per_page);
        let filter = filter_options(query.filter.as_ref());
        let search = search_options_for(search_fields, query.search.as_deref());

        let meta = PaginatedMeta {
            items_per_page: paging.items_per_page,
            total_items,
            current_page: paging.current_page,
            total_pages,
            sort_by: query.sort_by.clone(),
            search: search.term().unwrap_or_default().to_string(),
            select: query.select.clone().unwrap_or_default(),
            filter: (!filter.is_empty()).then(|| filter.to_filter_map()),
        };
        let links = build_links(query, &meta);

        Self { data, meta, links }
    }

    /// Convert the records while keeping metadata and links.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
            links: self.links,
        }
    }
}

fn build_links(query: &PaginateQuery, meta: &PaginatedMeta) -> PaginatedLinks {
    let base = PaginateQuery {
        page: None,
        limit: Some(meta.items_per_page),
        sort_by: meta.sort_by.clone(),
        search: Some(meta.search.clone()).filter(|search| !search.is_empty()),
        filter: meta.filter.clone(),
        select: None,
        path: None,
    };
    let path = query.path.as_deref().unwrap_or_default();
    let link = |page: u64| {
        let params = serialize_query(Some(&base.clone().with_page(page)));
        format!("{path}?{params}")
    };

    let has_previous = meta.total_items > 0 && meta.current_page > 1;
    let has_next = meta.current_page < meta.total_pages;

    PaginatedLinks {
        first: has_previous.then(|| link(1)),
        // Past the end, previous steps back to the last page that exists
        previous: has_previous.then(|| link((meta.current_page - 1).min(meta.total_pages))),
        current: link(meta.current_page),
        next: has_next.then(|| link(meta.current_page + 1)),
        last: has_next.then(|| link(meta.total_pages)),
    }
}
