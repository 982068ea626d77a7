//! Route modules for the portal server
//!
//! - ledger: Portal page, sorting, pagination, JSON views
//! - forms: Transaction modals and submission
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod forms;
pub mod ledger;
