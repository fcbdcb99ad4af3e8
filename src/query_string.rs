//! # Query-string codec
//!
//! The list-query contract travels as URL query parameters:
//!
//! ```text
//! page=<positive integer>
//! limit=<positive integer>
//! sortBy=<field>:<ASC|DESC>
//! search=<text>
//! filter.<field>=<value>        (repeatable per field)
//! ```
//!
//! [`serialize_query`] is the only encoder of that shape and [`parse_query`] accepts
//! exactly that shape. [`search_params`] is the flat encoder for requests that are
//! not list queries; it applies none of the list rules.
//!
//! ```
//! use storefront_query::models::PaginateQuery;
//! use storefront_query::query_string::{parse_query, serialize_query};
//! use storefront_query::sort::SortBy;
//!
//! let query = PaginateQuery::default()
//!     .with_page(2)
//!     .with_sort(SortBy::desc("price"))
//!     .with_filter("color", ["red", "blue"]);
//!
//! let encoded = serialize_query(Some(&query)).to_string();
//! assert_eq!(encoded, "page=2&sortBy=price%3ADESC&filter.color=red&filter.color=blue");
//! assert_eq!(parse_query(&encoded), query);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

use crate::models::{FilterMap, FilterValue, PaginateQuery};
use crate::sort::SortBy;

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SORT_BY_PARAM: &str = "sortBy";
pub const SEARCH_PARAM: &str = "search";
/// Prefix of `filter.<field>` parameters
pub const FILTER_PREFIX: &str = "filter.";

/// Ordered query parameters; repeated keys are allowed.
///
/// Displays as an `application/x-www-form-urlencoded` string without a leading `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// First value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, in order
    pub fn get_all<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// Serialize a list query into its canonical parameters.
///
/// In order: `page` and `limit` when set and non-zero, `sortBy` when set,
/// `search` when not blank, then one `filter.<field>` pair per filter value.
/// Sequences emit every element in order; empty scalars and absent entries emit
/// nothing. `None` yields no parameters. The query itself is left untouched.
#[must_use]
pub fn serialize_query(query: Option<&PaginateQuery>) -> QueryParams {
    let mut params = QueryParams::new();
    let Some(query) = query else {
        return params;
    };

    if let Some(page) = query.page.filter(|&page| page > 0) {
        params.append(PAGE_PARAM, page.to_string());
    }
    if let Some(limit) = query.limit.filter(|&limit| limit > 0) {
        params.append(LIMIT_PARAM, limit.to_string());
    }
    if let Some(sort_by) = &query.sort_by {
        params.append(SORT_BY_PARAM, sort_by.to_string());
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        params.append(SEARCH_PARAM, search);
    }
    for (field, value) in query.filter.iter().flatten() {
        let key = format!("{FILTER_PREFIX}{field}");
        match value {
            Some(FilterValue::Multi(values)) => {
                for value in values {
                    params.append(key.as_str(), value.as_str());
                }
            }
            Some(FilterValue::Scalar(value)) if !value.is_empty() => {
                params.append(key, value.as_str());
            }
            Some(FilterValue::Scalar(_)) | None => {}
        }
    }

    params
}

/// Parse a list query from a raw query string (a leading `?` is allowed).
///
/// Only the parameters [`serialize_query`] emits are read. `page`/`limit` must be
/// positive integers and `sortBy` a valid `<field>:<direction>` token; anything
/// malformed is treated as absent. For non-repeatable parameters the first
/// occurrence wins. A `filter.<field>` seen once becomes a scalar, repeated it
/// becomes a sequence in order of appearance.
#[must_use]
pub fn parse_query(raw: &str) -> PaginateQuery {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut query = PaginateQuery::default();
    let mut filters: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            PAGE_PARAM if query.page.is_none() => query.page = parse_positive(&value),
            LIMIT_PARAM if query.limit.is_none() => query.limit = parse_positive(&value),
            SORT_BY_PARAM if query.sort_by.is_none() => {
                query.sort_by = value.parse::<SortBy>().ok();
            }
            SEARCH_PARAM if query.search.is_none() => query.search = Some(value.into_owned()),
            key => {
                if let Some(field) = key.strip_prefix(FILTER_PREFIX).filter(|f| !f.is_empty()) {
                    filters
                        .entry(field.to_string())
                        .or_default()
                        .push(value.into_owned());
                }
            }
        }
    }

    if !filters.is_empty() {
        query.filter = Some(
            filters
                .into_iter()
                .map(|(field, mut values)| {
                    let value = if values.len() == 1 {
                        FilterValue::Scalar(values.remove(0))
                    } else {
                        FilterValue::Multi(values)
                    };
                    (field, Some(value))
                })
                .collect::<FilterMap>(),
        );
    }

    query
}

fn parse_positive(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|&n| n > 0)
}

/// Serialize a flat mapping into query parameters, one per non-null key.
///
/// Strings are emitted verbatim, numbers and booleans by their textual form,
/// sequences as their comma-joined elements and nested objects as JSON text.
/// None of the list-query rules (prefixes, array expansion) apply here. Input
/// that does not serialize to an object yields no parameters.
///
/// ```
/// use storefront_query::query_string::search_params;
///
/// #[derive(serde::Serialize)]
/// struct Lookup { ids: Vec<u32>, term: Option<String> }
///
/// let params = search_params(Some(&Lookup { ids: vec![1, 2], term: None }));
/// assert_eq!(params.to_string(), "ids=1%2C2");
/// ```
pub fn search_params<T>(params: Option<&T>) -> QueryParams
where
    T: Serialize + ?Sized,
{
    let mut query = QueryParams::new();
    let Some(params) = params else {
        return query;
    };

    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => {
            for (key, value) in map {
                if !value.is_null() {
                    query.append(key, value_text(&value));
                }
            }
        }
        Ok(Value::Null) => {}
        Ok(other) => {
            tracing::warn!(kind = %value_kind(&other), "Query parameters must be a flat mapping, ignoring");
        }
        Err(err) => {
            tracing::warn!(error = %err, "Query parameters could not be serialized, ignoring");
        }
    }

    query
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
