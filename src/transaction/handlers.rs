//! JSON route handlers for the transaction API.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, MessageBody,
    db::lock_connection,
    pagination::{Page, PaginationConfig},
    query_params::LenientQuery,
};

use super::{
    aggregation::{
        CategoryCount, PriceRangeCount, Statistics, get_category_counts, get_price_range_counts,
        get_statistics,
    },
    combined::{CombinedData, get_combined_data},
    core::{Transaction, count_transactions, insert_transactions},
    query::{ListQuery, list_transactions},
    seed::fetch_fixture,
};

/// The state needed for querying transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page defaults for list queries.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection to insert the seed data into.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Where to download the seed data from.
    pub fixture_url: String,
    /// The client used for the download.
    pub http_client: reqwest::Client,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            fixture_url: state.fixture_url.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

/// Query string for listing transactions.
///
/// Values are kept as text so that a malformed number falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    month: Option<String>,
    search: Option<String>,
    page: Option<String>,
    #[serde(rename = "perPage")]
    per_page: Option<String>,
}

impl ListParams {
    fn into_list_query(self, config: &PaginationConfig) -> ListQuery {
        ListQuery {
            page: Page::from_query(self.page.as_deref(), self.per_page.as_deref(), config),
            month: self.month,
            search: self.search.unwrap_or_default(),
        }
    }
}

/// Query string for the monthly aggregates.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    month: Option<String>,
}

/// Download the seed data and insert every transaction in it.
///
/// Calling this more than once stores the seed data more than once.
pub async fn initialize_endpoint(
    State(state): State<SeedState>,
) -> Result<Json<MessageBody>, Error> {
    let transactions = fetch_fixture(&state.http_client, &state.fixture_url).await?;

    let connection = lock_connection(&state.db_connection)?;
    let inserted = insert_transactions(&transactions, &connection)?;
    let total = count_transactions(&connection)?;
    tracing::info!("Seeded the database with {inserted} transactions, {total} stored in total");

    Ok(Json(MessageBody {
        message: "Database initialized successfully".to_owned(),
    }))
}

/// List a page of transactions for a month, optionally filtered by search text.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    LenientQuery(params): LenientQuery<ListParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let query = params.into_list_query(&state.pagination_config);
    let connection = lock_connection(&state.db_connection)?;

    list_transactions(&query, &connection).map(Json)
}

/// Get the sale statistics for a month.
pub async fn statistics_endpoint(
    State(state): State<TransactionState>,
    LenientQuery(params): LenientQuery<MonthParams>,
) -> Result<Json<Statistics>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_statistics(params.month.as_deref(), &connection).map(Json)
}

/// Get the number of transactions in each price range for a month.
pub async fn bar_chart_endpoint(
    State(state): State<TransactionState>,
    LenientQuery(params): LenientQuery<MonthParams>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_price_range_counts(params.month.as_deref(), &connection).map(Json)
}

/// Get the number of transactions in each category for a month.
pub async fn pie_chart_endpoint(
    State(state): State<TransactionState>,
    LenientQuery(params): LenientQuery<MonthParams>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category_counts(params.month.as_deref(), &connection).map(Json)
}

/// Get the transaction list, statistics and chart data for a month in one response.
///
/// `search`, `page` and `perPage` are applied to the transaction list.
pub async fn combined_endpoint(
    State(state): State<TransactionState>,
    LenientQuery(params): LenientQuery<ListParams>,
) -> Result<Json<CombinedData>, Error> {
    let query = params.into_list_query(&state.pagination_config);
    let connection = lock_connection(&state.db_connection)?;

    get_combined_data(&query, &connection).map(Json)
}
