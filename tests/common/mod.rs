#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Set,
};
use serde_json::Value;
use tower::ServiceExt;

pub mod product_entity;

use product_entity::{Product, product};
use storefront_query::routes::list_route;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(product::Entity);
    db.execute(backend.build(&stmt)).await?;

    Ok(db)
}

/// (name, articul, color, status, price); ids and `created_at` follow insertion order
pub const PRODUCTS: &[(&str, &str, &str, &str, i64)] = &[
    ("Desk Lamp", "LMP-001", "red", "active", 2500),
    ("Floor Lamp", "LMP-002", "blue", "active", 7900),
    ("Router X1", "NET-100", "blue", "active", 5400),
    ("Router X2", "NET-200", "black", "archived", 6400),
    ("Office Chair", "CHR-010", "black", "active", 12900),
    ("Wall Clock", "CLK-050", "white", "active", 1900),
    ("100% Cotton Towel", "TWL-100", "white", "active", 900),
    ("Cable_Organizer", "CBL-007", "black", "draft", 400),
    ("Bookshelf", "SHF-300", "brown", "active", 8900),
    ("Table Lamp", "LMP-003", "green", "archived", 3100),
    ("Keyboard", "KBD-001", "black", "active", 4500),
    ("Mouse", "MSE-001", "white", "active", 2100),
];

pub async fn seed_products(db: &DatabaseConnection) -> Result<(), DbErr> {
    for (index, (name, articul, color, status, price)) in PRODUCTS.iter().enumerate() {
        let position = i64::try_from(index).unwrap() + 1;
        product::ActiveModel {
            name: Set((*name).to_string()),
            articul: Set((*articul).to_string()),
            barcode: Set(format!("46000000000{position:02}")),
            color: Set((*color).to_string()),
            status: Set((*status).to_string()),
            price: Set(*price),
            created_at: Set(1_700_000_000 + position),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let api = Router::new()
        .route("/products", list_route::<Product>())
        .with_state(db);

    Router::new().nest("/api/v1", api)
}

/// Send debug logs to the captured test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub async fn seeded_app() -> Router {
    init_tracing();
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    seed_products(&db).await.expect("Failed to seed products");
    setup_test_app(db)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Ids of the records in a list response, in order
pub fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
