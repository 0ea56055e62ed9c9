//! Integration tests for checkout.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;

use pocket_shop_integration_tests::TestServer;

fn customer() -> serde_json::Value {
    json!({"name": "Grace Hopper", "email": "grace@example.com"})
}

#[tokio::test]
async fn test_checkout_returns_receipt_and_empties_cart() {
    let server = TestServer::start().await;
    // Laptop Stand 49.99 x2, USB-C Hub 39.99 x1
    server.post("/api/cart", &json!({"productId": 3, "qty": 2})).await;
    server.post("/api/cart", &json!({"productId": 5})).await;

    let (status, receipt) = server.post("/api/checkout", &customer()).await;
    assert_eq!(status, 200);
    assert_eq!(receipt["customerName"], "Grace Hopper");
    assert_eq!(receipt["customerEmail"], "grace@example.com");
    assert_eq!(receipt["total"], 139.97);

    let items = receipt["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Laptop Stand");
    assert_eq!(items[0]["qty"], 2);
    assert_eq!(items[0]["price"], 49.99);
    assert_eq!(items[0]["subtotal"], 99.98);
    assert_eq!(items[1]["name"], "USB-C Hub");
    assert_eq!(items[1]["subtotal"], 39.99);

    let order_id = receipt["orderId"].as_str().unwrap();
    assert!(order_id.starts_with("ORD-"));
    assert!(receipt["timestamp"].as_str().unwrap().contains('T'));

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], 0.0);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let server = TestServer::start().await;
    let (status, body) = server.post("/api/checkout", &customer()).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Cart is empty");
    assert_eq!(body["code"], "empty_cart");
}

#[tokio::test]
async fn test_checkout_requires_name_and_email() {
    let server = TestServer::start().await;
    server.post("/api/cart", &json!({"productId": 1})).await;

    for body in [
        json!({"email": "grace@example.com"}),
        json!({"name": "Grace"}),
        json!({"name": "   ", "email": "grace@example.com"}),
        json!({"name": "Grace", "email": "not-an-address"}),
    ] {
        let (status, response) = server.post("/api/checkout", &body).await;
        assert_eq!(status, 400);
        assert_eq!(response["code"], "invalid_input");
    }

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_consecutive_orders_have_distinct_ids() {
    let server = TestServer::start().await;

    server.post("/api/cart", &json!({"productId": 7})).await;
    let (_, first) = server.post("/api/checkout", &customer()).await;
    server.post("/api/cart", &json!({"productId": 7})).await;
    let (_, second) = server.post("/api/checkout", &customer()).await;

    assert_ne!(first["orderId"], second["orderId"]);
}

#[tokio::test]
async fn test_second_checkout_finds_empty_cart() {
    let server = TestServer::start().await;
    server.post("/api/cart", &json!({"productId": 6})).await;

    let (status, _) = server.post("/api/checkout", &customer()).await;
    assert_eq!(status, 200);
    let (status, body) = server.post("/api/checkout", &customer()).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "empty_cart");
}

#[tokio::test]
async fn test_receipt_echoes_email_as_entered() {
    let server = TestServer::start().await;
    server.post("/api/cart", &json!({"productId": 1})).await;

    let (status, receipt) = server
        .post(
            "/api/checkout",
            &json!({"name": "Grace Hopper", "email": "  Grace.Hopper@NAVY.mil "}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(receipt["customerEmail"], "Grace.Hopper@NAVY.mil");
}
