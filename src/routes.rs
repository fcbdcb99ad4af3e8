use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri, State},
    http::request::Parts,
    routing::{MethodRouter, get},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::errors::ApiError;
use crate::models::PaginateQuery;
use crate::paginate::Paginated;
use crate::query_string::parse_query;
use crate::traits::ListResource;

/// Decodes the query string of any request into a [`PaginateQuery`].
///
/// Decoding never rejects: malformed values are dropped and defaults apply.
/// The request path, before any `nest` prefix stripping, is kept for links.
impl<S> FromRequestParts<S> for PaginateQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |original| &original.0);

        let mut query = parse_query(uri.query().unwrap_or_default());
        query.path = Some(uri.path().to_string());
        Ok(query)
    }
}

/// List one page of `T`.
///
/// # Errors
///
/// Database failures, including filters naming unknown columns, become [`ApiError`].
pub async fn get_all<T>(
    query: PaginateQuery,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Paginated<T>>, ApiError>
where
    T: ListResource + Serialize,
{
    let page = T::paginate(&db, &query).await?;
    Ok(Json(page))
}

/// `GET` handler for the list endpoint of `T`:
/// `Router::new().route("/products", list_route::<Product>())`
pub fn list_route<T>() -> MethodRouter<DatabaseConnection>
where
    T: ListResource + Serialize + 'static,
{
    get(get_all::<T>)
}
