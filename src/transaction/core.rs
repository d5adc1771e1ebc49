//! Defines the core data model and database functions for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// A product sale listing, i.e. an item that was put up for sale in a given month.
///
/// The JSON field names match the seed data, e.g. `dateOfSale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the seed data.
    ///
    /// This is not unique in the database: seeding twice stores every
    /// transaction twice.
    pub id: i64,
    /// The product name.
    pub title: String,
    /// A free-form product description.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// A short label such as "electronics" or "jewelery".
    pub category: String,
    /// A URL to a picture of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was listed for sale, stored verbatim from the seed
    /// data, e.g. "2021-11-27T20:29:54+05:30".
    pub date_of_sale: String,
}

#[cfg(test)]
impl Transaction {
    /// Create a new transaction with placeholder text fields.
    pub fn build(price: f64, date_of_sale: &str) -> TransactionBuilder {
        TransactionBuilder {
            transaction: Transaction {
                id: 1,
                title: "Product".to_owned(),
                description: String::new(),
                price,
                category: "general".to_owned(),
                image: None,
                sold: false,
                date_of_sale: date_of_sale.to_owned(),
            },
        }
    }
}

/// A builder for creating [Transaction] instances in tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

#[cfg(test)]
impl TransactionBuilder {
    pub fn id(mut self, id: i64) -> Self {
        self.transaction.id = id;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.transaction.title = title.to_owned();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.transaction.description = description.to_owned();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.transaction.category = category.to_owned();
        self
    }

    pub fn sold(mut self, sold: bool) -> Self {
        self.transaction.sold = sold;
        self
    }

    pub fn finalize(self) -> Transaction {
        self.transaction
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// Insert `transactions` in order inside a single database transaction.
///
/// No attempt is made to skip transactions that already exist, so inserting
/// the same slice twice doubles the number of stored transactions.
///
/// # Errors
/// Returns an [Error::SqlError] if any insert fails, in which case none of
/// the transactions are stored.
pub fn insert_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    // Using unchecked_transaction because we only have &Connection from the MutexGuard.
    let tx = connection.unchecked_transaction()?;

    {
        let mut statement = tx.prepare(
            "INSERT INTO \"transaction\"
                (id, title, description, price, category, image, sold, date_of_sale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for transaction in transactions {
            statement.execute((
                transaction.id,
                &transaction.title,
                &transaction.description,
                transaction.price,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                &transaction.date_of_sale,
            ))?;
        }
    }

    tx.commit()?;

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(row_id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// `row_id` records insertion order. `id` comes from the seed data and is
/// deliberately not unique.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns in [TRANSACTION_COLUMNS].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
