//! Integration tests for the cart endpoints.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;

use pocket_shop_integration_tests::TestServer;

#[tokio::test]
async fn test_empty_cart() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/api/cart").await;

    assert_eq!(status, 200);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 0.0);
}

#[tokio::test]
async fn test_add_twice_accumulates_into_one_line() {
    let server = TestServer::start().await;

    let (status, first) = server.post("/api/cart", &json!({"productId": 1})).await;
    assert_eq!(status, 200);
    assert_eq!(first["message"], "Item added to cart");
    assert_eq!(first["productId"], 1);
    assert_eq!(first["qty"], 1);

    let (status, second) = server.post("/api/cart", &json!({"productId": 1, "qty": 1})).await;
    assert_eq!(status, 200);
    assert_eq!(second["message"], "Cart updated");
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["qty"], 2);

    let (_, cart) = server.get("/api/cart").await;
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["qty"], 2);
    assert_eq!(items[0]["name"], "Wireless Headphones");
    assert_eq!(cart["total"], 159.98);
}

#[tokio::test]
async fn test_cart_lines_are_in_insertion_order() {
    let server = TestServer::start().await;
    for product_id in [3, 1, 2] {
        server.post("/api/cart", &json!({"productId": product_id})).await;
    }

    let (_, cart) = server.get("/api/cart").await;
    let product_ids: Vec<i64> = cart["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["productId"].as_i64().unwrap())
        .collect();
    assert_eq!(product_ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_concurrent_adds_are_all_counted() {
    let server = std::sync::Arc::new(TestServer::start().await);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let server = server.clone();
            tokio::spawn(async move { server.post("/api/cart", &json!({"productId": 5})).await })
        })
        .collect();
    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, 200);
    }

    let (_, cart) = server.get("/api/cart").await;
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["qty"], 10);
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let server = TestServer::start().await;

    let (status, body) = server.post("/api/cart", &json!({"qty": 1})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "productId is required");
    assert_eq!(body["code"], "invalid_input");

    let (status, body) = server.post("/api/cart", &json!({"productId": 1, "qty": 0})).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "invalid_input");

    let (status, body) = server.post("/api/cart", &json!({"productId": 999})).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "not_found");

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let server = TestServer::start().await;
    let response = server
        .client()
        .post(server.url("/api/cart"))
        .header("content-type", "application/json")
        .body("{\"productId\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "invalid_input");
}

#[tokio::test]
async fn test_update_quantity() {
    let server = TestServer::start().await;
    let (_, added) = server.post("/api/cart", &json!({"productId": 2})).await;
    let id = added["id"].as_i64().unwrap();

    let (status, body) = server.put(&format!("/api/cart/{id}"), &json!({"qty": 4})).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Cart item updated");
    assert_eq!(body["id"], id);
    assert_eq!(body["qty"], 4);

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"][0]["qty"], 4);
    assert_eq!(cart["total"], 799.96);
}

#[tokio::test]
async fn test_update_below_one_is_rejected_and_cart_unchanged() {
    let server = TestServer::start().await;
    let (_, added) = server.post("/api/cart", &json!({"productId": 2, "qty": 3})).await;
    let id = added["id"].as_i64().unwrap();

    for body in [json!({"qty": 0}), json!({"qty": -1}), json!({})] {
        let (status, response) = server.put(&format!("/api/cart/{id}"), &body).await;
        assert_eq!(status, 400);
        assert_eq!(response["code"], "invalid_input");
    }

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"][0]["qty"], 3);
}

#[tokio::test]
async fn test_update_missing_line_is_not_found() {
    let server = TestServer::start().await;
    let (status, body) = server.put("/api/cart/12345", &json!({"qty": 2})).await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Cart item not found");
}

#[tokio::test]
async fn test_remove_line() {
    let server = TestServer::start().await;
    let (_, added) = server.post("/api/cart", &json!({"productId": 4})).await;
    let id = added["id"].as_i64().unwrap();

    let (status, body) = server.delete(&format!("/api/cart/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Item removed from cart");
    assert_eq!(body["id"], id);

    let (status, body) = server.delete(&format!("/api/cart/{id}")).await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "not_found");

    let (_, cart) = server.get("/api/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_non_numeric_id_is_invalid_input() {
    let server = TestServer::start().await;
    let (status, body) = server.delete("/api/cart/first").await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "invalid_input");
}
