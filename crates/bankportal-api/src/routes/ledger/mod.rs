//! Ledger routes - portal page, sorting, pagination
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_summary,
    api_transactions,
    htmx_ledger,
    htmx_paginate,
    htmx_set_page,
    htmx_toggle_sort,
};

pub use page::{page_index, render_ledger};
