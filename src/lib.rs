pub mod errors;
pub mod filter;
pub mod models;
pub mod paginate;
pub mod pagination;
pub mod query_string;
pub mod routes;
pub mod search;
pub mod sort;
pub mod traits;

pub use errors::ApiError;
pub use filter::{FilterPredicate, filter_options};
pub use models::{FilterMap, FilterValue, PaginateQuery};
pub use paginate::{Paginated, PaginatedLinks, PaginatedMeta};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
pub use query_string::{QueryParams, parse_query, search_params, serialize_query};
pub use search::{PRODUCT_SEARCH_FIELDS, SearchPredicate, search_options, search_options_for};
pub use sort::{SortBy, SortDirection};
pub use traits::ListResource;
