//! Combines the transaction list and the monthly aggregates into one payload.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

use super::{
    aggregation::{
        CategoryCount, PriceRangeCount, Statistics, get_category_counts, get_price_range_counts,
        get_statistics,
    },
    core::Transaction,
    query::{ListQuery, list_transactions},
};

/// Everything the dashboard needs to render a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// A page of transactions matching the month and search text.
    pub transactions: Vec<Transaction>,
    /// Sale totals for the month.
    pub statistics: Statistics,
    /// Transaction counts per price range for the month.
    pub bar_chart: Vec<PriceRangeCount>,
    /// Transaction counts per category for the month.
    pub pie_chart: Vec<CategoryCount>,
}

/// Run the list query and the three monthly aggregates for `query`.
///
/// The search text and page in `query` only apply to the transaction list.
/// If any of the queries fails the whole call fails.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the queries fails.
pub fn get_combined_data(
    query: &ListQuery,
    connection: &Connection,
) -> Result<CombinedData, Error> {
    let month = query.month.as_deref();

    Ok(CombinedData {
        transactions: list_transactions(query, connection)?,
        statistics: get_statistics(month, connection)?,
        bar_chart: get_price_range_counts(month, connection)?,
        pie_chart: get_category_counts(month, connection)?,
    })
}
