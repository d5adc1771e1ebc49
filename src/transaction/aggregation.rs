//! Monthly aggregates over transactions: sale statistics, price range counts
//! and category counts.
//!
//! All functions here filter by month only. Search text and pagination do
//! not apply to the aggregates.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::Error;

use super::{
    price_range::{PRICE_RANGES, price_range_index},
    query::MONTH_FILTER,
};

/// Sale totals for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price of every transaction in the month, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions in the month that were sold.
    pub sold_items: u32,
    /// The number of transactions in the month that were not sold.
    pub not_sold_items: u32,
}

/// The number of transactions in a price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101 - 200".
    pub range: String,
    /// How many transactions have a price in the bucket.
    pub count: u32,
}

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    #[serde(rename = "_id")]
    pub category: String,
    /// How many transactions have the category.
    pub count: u32,
}

/// Get the sale statistics for `month`.
///
/// A month with no transactions gives zero for every field.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_statistics(month: Option<&str>, connection: &Connection) -> Result<Statistics, Error> {
    let sql = format!(
        "SELECT
            TOTAL(price),
            COALESCE(SUM(CASE WHEN sold THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN sold THEN 0 ELSE 1 END), 0)
        FROM \"transaction\"
        WHERE {MONTH_FILTER}"
    );

    connection
        .query_row(&sql, named_params! { ":month": month }, |row| {
            Ok(Statistics {
                total_sale_amount: row.get(0)?,
                sold_items: row.get(1)?,
                not_sold_items: row.get(2)?,
            })
        })
        .map_err(Error::from)
}

/// Count the transactions in `month` that fall in each of the fixed price ranges.
///
/// Always returns one entry per range in ascending order, including empty ranges.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_price_range_counts(
    month: Option<&str>,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let sql = format!("SELECT price FROM \"transaction\" WHERE {MONTH_FILTER}");

    let prices = connection
        .prepare(&sql)?
        .query_map(named_params! { ":month": month }, |row| row.get::<_, f64>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(count_by_price_range(&prices))
}

fn count_by_price_range(prices: &[f64]) -> Vec<PriceRangeCount> {
    let mut counts = [0u32; PRICE_RANGES.len()];

    for &price in prices {
        counts[price_range_index(price)] += 1;
    }

    PRICE_RANGES
        .iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount {
            range: range.label(),
            count,
        })
        .collect()
}

/// Count the transactions in `month` for each category.
///
/// Categories appear in the order they were first inserted. Categories
/// without transactions in the month are left out.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_category_counts(
    month: Option<&str>,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    let sql = format!(
        "SELECT category, COUNT(row_id)
        FROM \"transaction\"
        WHERE {MONTH_FILTER}
        GROUP BY category
        ORDER BY MIN(row_id)"
    );

    connection
        .prepare(&sql)?
        .query_map(named_params! { ":month": month }, |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}
