//! Database query helpers for listing transactions by month.

use rusqlite::{Connection, named_params};

use crate::{Error, pagination::Page};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// SQL condition that keeps rows whose `date_of_sale` text contains `-:month-`.
///
/// This is a plain substring match on the stored text rather than a date
/// comparison, so "03" matches "2022-03-15" but "3" matches nothing in ISO
/// dates. A NULL `:month` matches no rows.
pub(crate) const MONTH_FILTER: &str = "instr(date_of_sale, '-' || :month || '-') > 0";

/// The parameters for listing transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// The two-digit month to filter by, e.g. "03". `None` matches nothing.
    pub month: Option<String>,
    /// Text that must appear in the title, description or price. Case-insensitive.
    pub search: String,
    /// The page of results to return.
    pub page: Page,
}

/// Get a page of transactions for a month in insertion order.
///
/// An empty `search` matches every transaction in the month. A page size of
/// zero returns every match.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn list_transactions(
    query: &ListQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let sql = format!(
        "SELECT {TRANSACTION_COLUMNS}
        FROM \"transaction\"
        WHERE {MONTH_FILTER}
            AND (
                :search = ''
                OR instr(unicode_lower(title), :search) > 0
                OR instr(unicode_lower(description), :search) > 0
                OR instr(CAST(price AS TEXT), :search) > 0
            )
        ORDER BY row_id ASC
        LIMIT :limit OFFSET :offset"
    );

    // SQLite treats a negative limit as no limit.
    let limit = match query.page.size {
        0 => -1,
        size => i64::try_from(size).unwrap_or(i64::MAX),
    };
    let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);
    let search = query.search.to_lowercase();

    connection
        .prepare(&sql)?
        .query_map(
            named_params! {
                ":month": query.month,
                ":search": search,
                ":limit": limit,
                ":offset": offset,
            },
            map_transaction_row,
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}
