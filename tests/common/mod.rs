#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gabble::config::{AppConfig, StorageBackend};
use gabble::AppState;

pub const JOKE: &str = "I told my wife she was drawing her eyebrows too high. She looked surprised.";
pub const PASSWORD: &str = "hunter2hunter2";

/// An in-process server on a free port, backed by the in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        let jokes_url = spawn_joke_server().await?;

        let mut config = AppConfig::development()
            .with_jwt_secret("integration-test-secret")
            .with_storage(StorageBackend::Memory);
        config.security.bcrypt_cost = 4;
        config.jokes.api_url = jokes_url;
        config.jokes.api_key = Some("test-key".to_string());

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.api.host = "127.0.0.1".to_string();
        config.api.port = port;
        let bind_addr = config.bind_addr();

        let state = AppState::from_config(config).await?;
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", bind_addr))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, gabble::app(state)).await;
        });

        Ok(Self {
            port,
            base_url: format!("http://{}", bind_addr),
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tracing::error!("test server on port {} never became ready", self.port);
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a user whose email and username derive from `name`
    pub async fn register(&self, name: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/users/register"))
            .json(&json!({
                "full_name": format!("{} Tester", name),
                "email": format!("{}@example.com", name),
                "username": name,
                "password": PASSWORD,
                "age": 29,
            }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register and log in, returning (user_id, token)
    pub async fn signup(&self, name: &str) -> Result<(i64, String)> {
        let res = self.register(name).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
        let body: Value = res.json().await?;
        let user_id = body["user_id"].as_i64().context("user_id missing")?;

        let res = self.login(&format!("{}@example.com", name), PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        let token = body["token"].as_str().context("token missing")?.to_string();

        Ok((user_id, token))
    }

    pub async fn create_post(&self, token: &str, content: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/posts"))
            .bearer_auth(token)
            .json(&json!({ "content": content, "image_url": "https://example.com/cat.png" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create post failed: {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["post"].clone())
    }

    pub async fn create_comment(&self, token: &str, post_id: i64, content: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/comments"))
            .bearer_auth(token)
            .json(&json!({ "content": content, "post_id": post_id }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create comment failed: {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["comment"].clone())
    }
}

/// Stand-in for the joke API: answers with one fixed joke when the key header is present
async fn spawn_joke_server() -> Result<String> {
    async fn jokes(headers: axum::http::HeaderMap) -> (axum::http::StatusCode, Json<Value>) {
        if headers.get("X-Api-Key").is_none() {
            return (axum::http::StatusCode::UNAUTHORIZED, Json(json!({ "error": "missing key" })));
        }
        (axum::http::StatusCode::OK, Json(json!([{ "joke": JOKE }])))
    }

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, Router::new().route("/v1/jokes", get(jokes))).await;
    });
    Ok(format!("http://{}/v1/jokes", addr))
}

/// Route server logs through the test harness; set RUST_LOG to see them
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Each test runs on its own runtime, so each gets a fresh server
pub async fn spawn_server() -> Result<TestServer> {
    init_tracing();
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
