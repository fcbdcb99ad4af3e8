use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::filter::filter_options;
use crate::models::PaginateQuery;
use crate::paginate::Paginated;
use crate::pagination::PaginationMeta;
use crate::search::search_options_for;
use crate::sort::resolve_sort;

/// A collection that can be listed through the shared query contract.
///
/// `Self` is the record returned to clients, built from the entity model.
///
/// ```rust,ignore
/// impl ListResource for Product {
///     type EntityType = product::Entity;
///     type ColumnType = product::Column;
///
///     const RESOURCE_NAME_PLURAL: &'static str = "products";
///
///     fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
///         vec![("name", product::Column::Name), ("price", product::Column::Price)]
///     }
///
///     fn default_sort() -> (Self::ColumnType, Order) {
///         (product::Column::CreatedAt, Order::Desc)
///     }
///
///     fn search_fields() -> &'static [&'static str] {
///         PRODUCT_SEARCH_FIELDS
///     }
/// }
/// ```
#[async_trait]
pub trait ListResource: Sized + Send + Sync
where
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait<Model: Sync> + Sync;
    type ColumnType: ColumnTrait + Copy + std::fmt::Debug;

    const RESOURCE_NAME_PLURAL: &'static str;

    /// Client-facing sort field names and the columns they order by
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)>;

    /// Ordering used when the query names no sortable field
    fn default_sort() -> (Self::ColumnType, Order);

    /// Fields the search term is matched against; empty disables search
    #[must_use]
    fn search_fields() -> &'static [&'static str] {
        &[]
    }

    /// Filter and search constraints of a query, AND-ed together
    #[must_use]
    fn list_condition(query: &PaginateQuery) -> Condition {
        let filter = filter_options(query.filter.as_ref());
        let search = search_options_for(Self::search_fields(), query.search.as_deref());

        let mut condition = Condition::all();
        if !filter.is_empty() {
            condition = condition.add(filter.to_condition(Self::EntityType::default()));
        }
        condition.add_option(search.to_condition(Self::EntityType::default()))
    }

    async fn total_count(db: &DatabaseConnection, condition: Condition) -> Result<u64, DbErr> {
        let query = Self::EntityType::find().filter(condition);
        PaginatorTrait::count(query, db).await
    }

    async fn get_page(
        db: &DatabaseConnection,
        condition: Condition,
        order_column: Self::ColumnType,
        order_direction: Order,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        let models = Self::EntityType::find()
            .filter(condition)
            .order_by(order_column, order_direction)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    /// Run a list query and wrap the page in the response envelope.
    ///
    /// # Errors
    ///
    /// Returns the database error when either the page or the count query fails,
    /// including filters that name a column the entity does not have.
    async fn paginate(
        db: &DatabaseConnection,
        query: &PaginateQuery,
    ) -> Result<Paginated<Self>, DbErr> {
        let condition = Self::list_condition(query);
        let paging = PaginationMeta::from_query(query);
        let (order_column, order_direction) = resolve_sort(
            query.sort_by.as_ref(),
            &Self::sortable_columns(),
            Self::default_sort(),
        );

        let total_items = Self::total_count(db, condition.clone()).await?;
        let data = Self::get_page(
            db,
            condition,
            order_column,
            order_direction,
            paging.skip,
            paging.take,
        )
        .await?;

        tracing::debug!(
            resource = Self::RESOURCE_NAME_PLURAL,
            page = paging.current_page,
            limit = paging.items_per_page,
            total_items,
            returned = data.len(),
            "Listed page"
        );

        Ok(Paginated::with_search_fields(
            query,
            data,
            total_items,
            Self::search_fields(),
        ))
    }
}
