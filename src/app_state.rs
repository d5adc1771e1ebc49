//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// Where the seed data for `/api/transactions/initialize` is downloaded from.
pub const DEFAULT_FIXTURE_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The URL of the JSON array used to seed the database.
    pub fixture_url: String,

    /// The HTTP client used to download the seed data.
    pub http_client: reqwest::Client,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transaction table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        fixture_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            fixture_url: fixture_url.to_owned(),
            http_client: reqwest::Client::new(),
            pagination_config,
        })
    }
}
