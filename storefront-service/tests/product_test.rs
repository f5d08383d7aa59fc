//! Catalog endpoint tests against the seeded demo store.
//!
//! Run with: cargo test -p storefront-service --test product_test

mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::Value;

async fn get_json(client: &Client, url: String) -> (u16, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
async fn list_products_returns_seeded_catalog() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/products", app.address)).await;

    assert_eq!(status, 200);
    let products = body.as_array().expect("Expected a JSON array");
    assert_eq!(products.len(), 10);

    // Each seeded product appears exactly once, with its seeded fields.
    let pegasus: Vec<&Value> = products
        .iter()
        .filter(|p| p["name"] == "Pegasus 40")
        .collect();
    assert_eq!(pegasus.len(), 1);
    assert_eq!(pegasus[0]["brand"], "Nike");
    assert_eq!(pegasus[0]["price"], 120.0);
    assert_eq!(pegasus[0]["stock"], 8);
}

#[tokio::test]
async fn list_products_is_idempotent() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (_, first) = get_json(&client, format!("{}/products", app.address)).await;
    let (_, second) = get_json(&client, format!("{}/products", app.address)).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn get_product_returns_the_requested_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (_, listed) = get_json(&client, format!("{}/products", app.address)).await;
    for product in listed.as_array().expect("Expected a JSON array") {
        let id = product["id"].as_i64().expect("Expected numeric id");
        let (status, fetched) =
            get_json(&client, format!("{}/products/{}", app.address, id)).await;

        assert_eq!(status, 200);
        assert_eq!(fetched["id"], id);
        assert_eq!(fetched["name"], product["name"]);
        assert_eq!(fetched["price"], product["price"]);
    }
}

#[tokio::test]
async fn first_seeded_product_is_served_by_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/products/1", app.address)).await;

    assert_eq!(status, 200);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Pegasus 40");
    assert_eq!(body["price"], 120.0);
}

#[tokio::test]
async fn unknown_product_returns_404_with_error_body() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/products/999", app.address)).await;

    assert_eq!(status, 404);
    let error = body["error"].as_str().expect("Expected an error body");
    assert!(!error.is_empty());
}

#[tokio::test]
async fn malformed_product_id_is_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/products/not-a-number", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn brand_filter_narrows_the_catalog() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) =
        get_json(&client, format!("{}/products?brand=Nike", app.address)).await;

    assert_eq!(status, 200);
    let products = body.as_array().expect("Expected a JSON array");
    assert_eq!(products.len(), 1);
    assert!(products.iter().all(|p| p["brand"] == "Nike"));
}

#[tokio::test]
async fn category_filter_narrows_the_catalog() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(
        &client,
        format!("{}/products?category=Running", app.address),
    )
    .await;

    assert_eq!(status, 200);
    let products = body.as_array().expect("Expected a JSON array");
    assert_eq!(products.len(), 5);
    assert!(products.iter().all(|p| p["category"] == "Running"));
}

#[tokio::test]
async fn combined_filters_intersect() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(
        &client,
        format!("{}/products?brand=Adidas&category=Running", app.address),
    )
    .await;

    assert_eq!(status, 200);
    let products = body.as_array().expect("Expected a JSON array");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Ultraboost Light");
}

#[tokio::test]
async fn unknown_brand_yields_empty_array_not_error() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let (status, body) = get_json(
        &client,
        format!("{}/products?brand=NoSuchBrand", app.address),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));
}
