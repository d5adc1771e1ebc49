//! A dashboard for browsing product sale transactions.
//!
//! This library provides a JSON REST API for listing and aggregating
//! transactions by month, plus a server-rendered dashboard page that shows a
//! searchable transaction table, summary statistics and two charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod pagination;
mod query_params;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, DEFAULT_FIXTURE_URL};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::Transaction;

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Every variant means a backend operation failed. The API reports all of
/// them the same way: a 500 status with the error text as the message.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The seed data could not be downloaded or decoded.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch the seed data: {0}")]
    FixtureFetch(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

/// The JSON body sent back for both status messages and errors.
#[derive(Debug, Serialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl Error {
    /// Render the error as an HTML page for routes that serve the dashboard.
    fn into_html_response(self) -> Response {
        tracing::error!("Could not render the dashboard: {}", self);

        match self {
            Error::DatabaseLockError => InternalServerError {
                description: "Server Busy",
                fix: "The database is unavailable. Try again later.",
            }
            .into_response(),
            _ => InternalServerError::default().into_response(),
        }
    }
}
