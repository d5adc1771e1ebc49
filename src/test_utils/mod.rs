#![allow(missing_docs)]

pub(crate) mod html;

use axum::{Json, Router, routing::get};
use rusqlite::Connection;
use serde_json::Value;
use tokio::net::TcpListener;

use crate::{AppState, PaginationConfig, db::initialize};

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&conn).expect("Could not initialize database");
    conn
}

pub(crate) fn get_test_app_state(fixture_url: &str) -> AppState {
    let conn = Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(conn, fixture_url, PaginationConfig::default())
        .expect("Could not create app state")
}

/// Serve `body` as JSON from a local HTTP server and return its URL.
pub(crate) async fn spawn_fixture_server(body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind fixture server");
    let address = listener
        .local_addr()
        .expect("Could not get fixture server address");

    let app = Router::new().route(
        "/fixture.json",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fixture server stopped unexpectedly");
    });

    format!("http://{address}/fixture.json")
}

/// A URL that refuses connections.
pub(crate) const UNREACHABLE_FIXTURE_URL: &str = "http://127.0.0.1:1/fixture.json";
