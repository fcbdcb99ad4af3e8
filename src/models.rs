use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::sort::SortBy;

/// Raw filter input: field name to an optional value.
///
/// Entries are independently optional; an entry mapped to `None` places no
/// constraint on that field.
pub type FilterMap = BTreeMap<String, Option<FilterValue>>;

/// Value of one `filter.<field>` entry.
///
/// A `Multi` value means "field equals any of these".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Multi(Vec<String>),
}

impl FilterValue {
    /// All values carried, in order
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// Whether this value constrains anything: a non-empty scalar, or a
    /// sequence holding at least one non-empty element.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Scalar(value) => !value.is_empty(),
            Self::Multi(values) => values.iter().any(|value| !value.is_empty()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(values: [&str; N]) -> Self {
        Self::Multi(values.iter().map(ToString::to_string).collect())
    }
}

/// Query parameters for listing a collection.
///
/// # Pagination
/// `page` is 1-based; `limit` defaults to [`crate::pagination::DEFAULT_LIMIT`].
///
/// # Sorting
/// `sortBy` takes a single `<field>:<direction>` token, for example `createdAt:DESC`.
///
/// # Search
/// `search` is a free-text term matched case-insensitively against the
/// resource's searchable fields.
///
/// # Filtering
/// Each `filter.<field>=<value>` pair adds an equality constraint. Repeating the
/// same field (`filter.status=NEW&filter.status=PAID`) matches any of the values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginateQuery {
    /// Page number (1-based).
    #[param(example = 1)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Number of items per page.
    #[param(example = 10)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Sort key in the format `<field>:<ASC|DESC>`.
    #[param(value_type = Option<String>, example = "createdAt:DESC")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    /// Free-text search term.
    #[param(example = "router")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Equality filters, sent as `filter.<field>=<value>`.
    #[param(value_type = Option<Object>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMap>,
    /// Fields to select; echoed back in the response metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
    /// Request path the query was received on, used as the base of
    /// pagination links. Never part of the query string.
    #[serde(skip)]
    pub path: Option<String>,
}

impl PaginateQuery {
    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Add (or replace) one filter entry
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter
            .get_or_insert_with(FilterMap::new)
            .insert(field.into(), Some(value.into()));
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}
