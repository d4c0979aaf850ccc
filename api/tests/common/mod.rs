use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::cli::Cli;
use api::bootstrap::config::Config;
use api::infrastructure::memory::{MemoryAccounts, MemorySessions, MemoryUsers};

/// Router wired exactly like the server, minus Postgres and Redis.
pub fn test_router() -> Router {
    router_with(MemoryAccounts::default())
}

/// Same router over a caller-supplied account store.
pub fn router_with(accounts: MemoryAccounts) -> Router {
    let cli = Cli {
        dev: true,
        docker: false,
    };
    let cfg = Config::from_lookup(&cli, |_| None).unwrap();
    let services = AppServices::new(
        Arc::new(accounts),
        Arc::new(MemoryUsers::default()),
        Arc::new(MemorySessions::default()),
    );
    let ctx = AppContext::new(cfg, services);
    Router::new().nest("/api/v1", api::presentation::http::routes(ctx))
}

pub struct Reply {
    pub status: axum::http::StatusCode,
    pub cookies: HashMap<String, String>,
    pub json: serde_json::Value,
}

/// Sends one request; `cookie` is sent verbatim as the Cookie header.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Reply {
    let headers: Vec<(header::HeaderName, String)> = cookie
        .map(|c| (header::COOKIE, c.to_string()))
        .into_iter()
        .collect();
    send_with(app, method, uri, body, &headers).await
}

pub async fn send_with(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    headers: &[(header::HeaderName, String)],
) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        req = req.header(name.clone(), value.as_str());
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    into_reply(response).await
}

async fn into_reply(response: Response<Body>) -> Reply {
    let status = response.status();
    let cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    Reply {
        status,
        cookies,
        json,
    }
}

/// Registers an account and returns its reply.
pub async fn register(app: &Router, email: &str, username: &str, password: &str) -> Reply {
    send(
        app,
        "POST",
        "/api/v1/account",
        Some(serde_json::json!({
            "email": email,
            "username": username,
            "password": password,
        })),
        None,
    )
    .await
}
