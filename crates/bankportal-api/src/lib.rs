//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::ledger: Portal page, sorting, pagination, JSON views
//! - routes::forms: Transaction modals and submission

pub mod error;
pub mod routes;

use anyhow::Context;
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use bankportal_config::Config;
use bankportal_core::Ledger;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::forms::{htmx_close_form, htmx_open_form, htmx_submit_transaction};
    use routes::ledger::{
        api_summary, api_transactions, htmx_ledger, htmx_paginate, htmx_set_page, htmx_toggle_sort,
        page_index,
    };

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/summary", get(api_summary))
        .route("/api/reload", post(api_reload))
        .layer(CorsLayer::permissive());

    Router::new()
        // Full page
        .route("/", get(page_index))
        // HTMX partial routes
        .route("/ledger", get(htmx_ledger))
        .route("/ledger/paginate", post(htmx_paginate))
        .route("/ledger/pages/:index", post(htmx_set_page))
        .route("/ledger/sort", post(htmx_toggle_sort))
        .route("/forms", delete(htmx_close_form))
        .route("/forms/:kind", post(htmx_open_form))
        .route("/transactions/:kind", post(htmx_submit_transaction))
        .merge(api)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Re-fetch the data source and reset all view state
async fn api_reload(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    let mut ledger = state.ledger.write().await;
    let body = match ledger.reload().await {
        Ok(_) => serde_json::json!({
            "success": true,
            "message": format!("Reloaded {} transactions", ledger.transactions().len()),
        }),
        Err(e) => serde_json::json!({ "success": false, "message": e.to_string() }),
    };
    Json(body)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .user-name:empty::before {{ content: 'there'; opacity: 0.6; }}
    </style>
</head>
<body>
    {}
</body>
</html>"#,
        title, content
    )
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").map(|v| v == "true").unwrap_or(false)
}

/// Wrap page content; HTMX requests get the bare content
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(
                r#"<main class='flex flex-col p-14 min-h-screen bg-[#025257]'>
    <div class='container mx-auto'>{}</div>
</main>"#,
                inner_content
            ),
        )
    }
}

/// Bind and serve until the process stops
pub async fn start_server(config: Config, ledger: Arc<RwLock<Ledger>>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { ledger, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("Starting banking portal on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Portal)");
    log::info!("  - /ledger, /forms, /transactions (HTMX fragments)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await.context("server error")?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bankportal_source::{JsonFileSource, MemorySource, Record, SourceRef};
    use tower::ServiceExt;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(format!("2024-02-{:02}", i + 1), format!("entry {}", i), 10.0, 500.0))
            .collect()
    }

    async fn state_with(source: SourceRef) -> AppState {
        let config = Config::default();
        let mut ledger = Ledger::new(config.clone(), source);
        let _ = ledger.load().await;
        AppState {
            ledger: Arc::new(RwLock::new(ledger)),
            config,
        }
    }

    async fn memory_state(n: usize) -> AppState {
        state_with(Arc::new(MemorySource::new(records(n)))).await
    }

    async fn send(state: &AppState, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let state = memory_state(0).await;
        let (status, body) = send(&state, "GET", "/api/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_index_full_and_htmx() {
        let state = memory_state(3).await;
        let (status, body) = send(&state, "GET", "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Welcome to your banking portal"));
        assert!(body.contains("id='ledger'"));

        let request = Request::builder()
            .uri("/")
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8(bytes.to_vec()).unwrap().contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_open_submit_close_cycle() {
        let state = memory_state(0).await;

        let (status, body) = send(&state, "POST", "/forms/deposit", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id='overlay'"));
        assert!(body.contains("deposit Money"));

        let (status, body) = send(&state, "POST", "/transactions/deposit", "description=Paycheck&amount=100.00").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Paycheck"));
        assert!(!body.contains("id='overlay'"));

        let (_, body) = send(&state, "POST", "/transactions/withdraw", "description=Cash&amount=25.50").await;
        assert!(body.contains("$74.5"));

        let ledger = state.ledger.read().await;
        assert_eq!(ledger.transactions()[0].amount, -25.5);
        assert_eq!(ledger.transactions()[0].balance, 74.5);
    }

    #[tokio::test]
    async fn test_transfer_description() {
        let state = memory_state(1).await;
        let (status, body) = send(
            &state,
            "POST",
            "/transactions/transfer",
            "recipient=Alice&iban=DE89370400440532013000&amount=40",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Transferred to Alice"));
        assert_eq!(state.ledger.read().await.displayed_balance(), 460.0);
    }

    #[tokio::test]
    async fn test_close_form_routes() {
        let state = memory_state(0).await;
        send(&state, "POST", "/forms/transfer", "").await;
        let (_, body) = send(&state, "DELETE", "/forms", "").await;
        assert!(!body.contains("id='overlay'"));

        send(&state, "POST", "/forms/withdraw", "").await;
        let (status, body) = send(&state, "POST", "/forms/none", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("id='overlay'"));
    }

    #[tokio::test]
    async fn test_invalid_kind_is_not_found() {
        let state = memory_state(0).await;
        let (status, _) = send(&state, "POST", "/forms/loan", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&state, "POST", "/transactions/loan", "amount=5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.ledger.read().await.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_pagination_routes() {
        let state = memory_state(25).await;

        send(&state, "POST", "/ledger/paginate?delta=-1", "").await;
        assert_eq!(state.ledger.read().await.page(), 0);

        send(&state, "POST", "/ledger/paginate?delta=1", "").await;
        assert_eq!(state.ledger.read().await.page(), 1);

        let (status, _) = send(&state, "POST", "/ledger/pages/2", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.ledger.read().await.page(), 2);

        let (status, _) = send(&state, "POST", "/ledger/pages/3", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.ledger.read().await.page(), 2);

        let (status, _) = send(&state, "POST", "/ledger/paginate?delta=abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paginate_route_ignores_overflowing_delta() {
        let state = memory_state(25).await;
        send(&state, "POST", "/ledger/paginate?delta=1", "").await;

        let uri = format!("/ledger/paginate?delta={}", isize::MAX);
        let (status, body) = send(&state, "POST", &uri, "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id='ledger'"));
        assert_eq!(state.ledger.read().await.page(), 1);
    }

    #[tokio::test]
    async fn test_sort_route() {
        let state = memory_state(3).await;
        let (_, body) = send(&state, "POST", "/ledger/sort", "").await;
        assert!(body.contains("data-sort='ascending'"));
        assert!(body.find("entry 0").unwrap() < body.find("entry 2").unwrap());
    }

    #[tokio::test]
    async fn test_json_endpoints() {
        let state = memory_state(12).await;

        let (status, body) = send(&state, "GET", "/api/transactions?page=1", "").await;
        assert_eq!(status, StatusCode::OK);
        let page: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(page["page"], 1);
        assert_eq!(page["page_count"], 2);
        assert_eq!(page["transactions"].as_array().unwrap().len(), 2);

        let (status, body) = send(&state, "GET", "/api/transactions?page=9", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["success"], false);
        assert_eq!(error["code"], "PAGE_OUT_OF_RANGE");
        assert_eq!(error["suggestions"][0], "Use a page index between 0 and 1.");

        let (_, body) = send(&state, "GET", "/api/summary", "").await;
        let summary: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(summary["total_transactions"], 12);
        assert_eq!(summary["sort"], "descending");
        assert_eq!(summary["load_state"]["state"], "loaded");
    }

    #[tokio::test]
    async fn test_failed_load_renders_error_card_and_reload_recovers() {
        let path = std::env::temp_dir().join(format!("bankportal-api-{}-reload.json", std::process::id()));
        std::fs::remove_file(&path).ok();

        let state = state_with(Arc::new(JsonFileSource::new(&path))).await;
        let (_, body) = send(&state, "GET", "/", "").await;
        assert!(body.contains("id='error-card'"));
        assert!(body.contains("There was an error fetching the data"));

        let (_, body) = send(&state, "POST", "/api/reload", "").await;
        assert!(body.contains("\"success\":false"));

        std::fs::write(&path, r#"[{"date": "2024-01-01", "description": "Opening", "amount": 50, "balance": 50}]"#).unwrap();
        let (_, body) = send(&state, "POST", "/api/reload", "").await;
        assert!(body.contains("\"success\":true"));

        let (_, body) = send(&state, "GET", "/ledger", "").await;
        assert!(!body.contains("id='error-card'"));
        assert!(body.contains("Opening"));
        std::fs::remove_file(&path).ok();
    }
}
