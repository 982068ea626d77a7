//! Form routes - transaction modals and their submission
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Overlay, form and error card rendering

pub mod api;
pub mod page;

pub use api::{htmx_close_form, htmx_open_form, htmx_submit_transaction, parse_form_body};

pub use page::{render_error_card, render_overlay, render_transaction_form};
