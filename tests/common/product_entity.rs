use sea_orm::Order;
use serde::Serialize;
use storefront_query::{ListResource, PRODUCT_SEARCH_FIELDS};

pub mod product {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub articul: String,
        #[sea_orm(unique)]
        pub barcode: String,
        pub color: String,
        pub status: String,
        pub price: i64,
        pub created_at: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub articul: String,
    pub barcode: String,
    pub color: String,
    pub status: String,
    pub price: i64,
    pub created_at: i64,
}

impl From<product::Model> for Product {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            articul: model.articul,
            barcode: model.barcode,
            color: model.color,
            status: model.status,
            price: model.price,
            created_at: model.created_at,
        }
    }
}

impl ListResource for Product {
    type EntityType = product::Entity;
    type ColumnType = product::Column;

    const RESOURCE_NAME_PLURAL: &'static str = "products";

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("id", product::Column::Id),
            ("name", product::Column::Name),
            ("price", product::Column::Price),
            ("createdAt", product::Column::CreatedAt),
        ]
    }

    fn default_sort() -> (Self::ColumnType, Order) {
        (product::Column::CreatedAt, Order::Desc)
    }

    fn search_fields() -> &'static [&'static str] {
        PRODUCT_SEARCH_FIELDS
    }
}
