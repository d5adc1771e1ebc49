//! Dashboard module
//!
//! Provides a page showing a month of transactions with summary statistics
//! and charts. The month, search text and page live in the query string.

mod charts;
mod handlers;
mod tables;
mod view_state;

pub use handlers::get_dashboard_page;
