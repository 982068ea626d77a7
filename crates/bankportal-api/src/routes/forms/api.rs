//! Form endpoints - open, close and submit the transaction forms
//!
//! Endpoints:
//! - htmx_open_form: Show a form (`none` hides it)
//! - htmx_close_form: Hide the form
//! - htmx_submit_transaction: Create a transaction from the posted form

use crate::routes::ledger::render_ledger;
use crate::{ApiError, AppState};
use axum::extract::Path;
use axum::response::Html;
use bankportal_core::{FormFields, FormVisibility, TransactionKind};
use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form_body(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " ")).unwrap_or_default().into_owned();
        let value = urlencoding::decode(&value.replace('+', " ")).unwrap_or_default().into_owned();
        params.insert(key, value);
    }
    params
}

/// HTMX: Open the form for a kind
pub async fn htmx_open_form(
    state: axum::extract::State<AppState>,
    Path(kind): Path<String>,
) -> Result<Html<String>, ApiError> {
    let visibility: FormVisibility = kind.parse()?;
    let mut ledger = state.ledger.write().await;
    match visibility.kind() {
        Some(kind) => ledger.open_form(kind),
        None => ledger.close_form(),
    }
    Ok(Html(render_ledger(&ledger)))
}

/// HTMX: Close the form
pub async fn htmx_close_form(state: axum::extract::State<AppState>) -> Html<String> {
    let mut ledger = state.ledger.write().await;
    ledger.close_form();
    Html(render_ledger(&ledger))
}

/// HTMX: Store a new transaction
pub async fn htmx_submit_transaction(
    state: axum::extract::State<AppState>,
    Path(kind): Path<String>,
    body: String,
) -> Result<Html<String>, ApiError> {
    let kind: TransactionKind = kind.parse()?;
    let fields = FormFields::from_map(&parse_form_body(&body));

    let mut ledger = state.ledger.write().await;
    ledger.submit_transaction(kind, &fields);
    Ok(Html(render_ledger(&ledger)))
}
