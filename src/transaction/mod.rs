//! Transactions and the queries that power the dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its database table
//! - The monthly list query and the statistics, price range and category aggregates
//! - Seeding the database from a remote JSON fixture
//! - The JSON route handlers for the transaction API

mod aggregation;
mod combined;
mod core;
mod handlers;
mod price_range;
mod query;
mod seed;

pub use aggregation::{CategoryCount, PriceRangeCount, Statistics};
pub use combined::{CombinedData, get_combined_data};
pub use core::{Transaction, create_transaction_table};
pub use handlers::{
    bar_chart_endpoint, combined_endpoint, initialize_endpoint, list_transactions_endpoint,
    pie_chart_endpoint, statistics_endpoint,
};
pub use query::ListQuery;

#[cfg(test)]
pub use core::{count_transactions, insert_transactions};
