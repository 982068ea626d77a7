//! Ledger API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: One page of the sorted ledger (JSON)
//! - api_summary: Ledger overview (JSON)
//! - htmx_ledger: Ledger fragment (HTML)
//! - htmx_paginate: Move by a page delta (HTMX)
//! - htmx_set_page: Jump to a page (HTMX)
//! - htmx_toggle_sort: Flip the date sort (HTMX)

use super::page::render_ledger;
use crate::{ApiError, AppState};
use axum::extract::{Path, Query};
use axum::response::Html;
use axum::Json;
use bankportal_core::{LedgerSummary, TransactionsPage};
use std::collections::HashMap;

/// Get one page of transactions (JSON API); defaults to the current page
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let ledger = state.ledger.read().await;
    let page = match params.get("page") {
        Some(raw) => raw.parse::<usize>().map_err(|_| ApiError::BadRequest {
            message: format!("invalid page '{}'", raw),
        })?,
        None => ledger.page(),
    };
    Ok(Json(ledger.page_view(page)?))
}

/// Get ledger summary (JSON API)
pub async fn api_summary(state: axum::extract::State<AppState>) -> Json<LedgerSummary> {
    let ledger = state.ledger.read().await;
    Json(ledger.summary())
}

/// HTMX: Ledger fragment
pub async fn htmx_ledger(state: axum::extract::State<AppState>) -> Html<String> {
    let ledger = state.ledger.read().await;
    Html(render_ledger(&ledger))
}

/// HTMX: Previous / next page; out-of-range moves are ignored
pub async fn htmx_paginate(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let delta = params
        .get("delta")
        .map(|raw| {
            raw.parse::<isize>().map_err(|_| ApiError::BadRequest {
                message: format!("invalid delta '{}'", raw),
            })
        })
        .transpose()?
        .unwrap_or(0);

    let mut ledger = state.ledger.write().await;
    if !ledger.paginate(delta) {
        log::debug!("Ignoring page move by {} from page {}", delta, ledger.page());
    }
    Ok(Html(render_ledger(&ledger)))
}

/// HTMX: Jump to a page
pub async fn htmx_set_page(
    state: axum::extract::State<AppState>,
    Path(index): Path<usize>,
) -> Result<Html<String>, ApiError> {
    let mut ledger = state.ledger.write().await;
    ledger.set_page(index)?;
    Ok(Html(render_ledger(&ledger)))
}

/// HTMX: Flip the date sort direction
pub async fn htmx_toggle_sort(state: axum::extract::State<AppState>) -> Html<String> {
    let mut ledger = state.ledger.write().await;
    let order = ledger.toggle_sort();
    log::debug!("Sorting ledger {}", order);
    Html(render_ledger(&ledger))
}
