//! Integration tests for Pocket Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-shop-integration-tests
//! ```
//!
//! Each test boots the real storefront router on an ephemeral local port,
//! backed by a private in-memory database seeded with the demo catalog, and
//! talks to it over HTTP with `reqwest`.
//!
//! # Test Categories
//!
//! - `catalog_api` - Product listing and health checks
//! - `cart_api` - Cart add, update, remove and error mapping
//! - `checkout_api` - Receipts, totals and cart clearing

use std::net::SocketAddr;

use serde_json::Value;

use pocket_shop_storefront::config::StorefrontConfig;
use pocket_shop_storefront::db::Database;
use pocket_shop_storefront::state::AppState;

/// A storefront server running in the background of the current test.
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a server with the demo catalog seeded.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    pub async fn start() -> Self {
        let db = Database::in_memory()
            .await
            .expect("Failed to open in-memory database");
        pocket_shop_storefront::prepare_database(&db, true)
            .await
            .expect("Failed to prepare database");

        let app = pocket_shop_storefront::app(AppState::new(StorefrontConfig::default(), db));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path` (which starts with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The HTTP client to use against this server.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        decode(response).await
    }

    /// Send `body` as JSON with `method` to `path` and decode the JSON reply.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &Value,
    ) -> (u16, Value) {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed");
        decode(response).await
    }

    /// POST `body` as JSON to `path`.
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send_json(reqwest::Method::POST, path, body).await
    }

    /// PUT `body` as JSON to `path`.
    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        self.send_json(reqwest::Method::PUT, path, body).await
    }

    /// DELETE `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed");
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json().await.expect("Response body is not JSON");
    (status, body)
}
