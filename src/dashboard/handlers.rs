//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the full page and the htmx partial
//! - State types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use time::Month;

use crate::{
    AppState,
    dashboard::{
        charts::{DashboardChart, category_chart, charts_view, price_range_chart},
        tables::{statistics_panel, transactions_table},
        view_state::{DashboardParams, ViewState, month_options},
    },
    db::lock_connection,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base,
    },
    pagination::PaginationConfig,
    query_params::LenientQuery,
    transaction::{CombinedData, get_combined_data},
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page size of the transaction table.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Display the dashboard for the month, search text and page in the query string.
///
/// Requests made by htmx get only the `#dashboard-content` element so the
/// filter controls keep their focus and value while typing.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    LenientQuery(params): LenientQuery<DashboardParams>,
) -> Response {
    let view_state = ViewState::from_params(params);
    let query = view_state.list_query(&state.pagination_config);

    let data = match lock_connection(&state.db_connection)
        .and_then(|connection| get_combined_data(&query, &connection))
    {
        Ok(data) => data,
        Err(error) => return error.into_html_response(),
    };

    let content = dashboard_content(&view_state, &data);

    if is_htmx_request {
        content.into_response()
    } else {
        dashboard_view(&view_state, &content).into_response()
    }
}

/// The display name for a two-digit month, e.g. "March" for "03".
///
/// Values that are not a month are shown as given.
fn month_name(month: &str) -> String {
    month
        .parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(|month| month.to_string())
        .unwrap_or_else(|| month.to_owned())
}

fn build_dashboard_charts(data: &CombinedData) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(&data.bar_chart).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&data.pie_chart).to_string(),
        },
    ]
}

/// Renders the full dashboard page with the filter controls around the content.
fn dashboard_view(view_state: &ViewState, content: &Markup) -> Markup {
    let page = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Transaction Dashboard" }

            form
                id="dashboard-filters"
                hx-get=(endpoints::DASHBOARD_VIEW)
                hx-target="#dashboard-content"
                hx-swap="outerHTML"
                hx-trigger="change, input delay:300ms from:#search"
                hx-indicator="#indicator"
                hx-push-url="true"
                class="w-full max-w-screen-xl flex flex-col md:flex-row gap-4 mb-6"
            {
                div class="flex-1"
                {
                    label for="search" class=(FORM_LABEL_STYLE) { "Search transaction" }
                    input
                        id="search"
                        type="search"
                        name="search"
                        value=(view_state.search)
                        placeholder="Title, description or price"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                    select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for (value, month) in month_options() {
                            option value=(value) selected[value == view_state.month] { (month) }
                        }
                    }
                }

                span id="indicator" class="htmx-indicator self-end mb-2" { "Loading..." }
            }

            (content)
        }
    );

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_URL.to_owned())],
        &page,
    )
}

/// Renders the part of the dashboard that changes with the view state.
fn dashboard_content(view_state: &ViewState, data: &CombinedData) -> Markup {
    let charts = build_dashboard_charts(data);
    let previous = view_state.previous_page();
    let next = view_state.next_page();

    html!(
        div
            id="dashboard-content"
            class="w-full max-w-screen-xl text-gray-900 dark:text-white"
        {
            (transactions_table(&data.transactions))

            nav class="flex items-center justify-between mb-8" aria-label="Table navigation"
            {
                span class="text-sm" data-page-number { "Page " (view_state.page) }

                div class="flex gap-2"
                {
                    a
                        id="previous-page"
                        href=(previous.href())
                        hx-get=(previous.href())
                        hx-target="#dashboard-content"
                        hx-swap="outerHTML"
                        hx-push-url="true"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Previous"
                    }

                    a
                        id="next-page"
                        href=(next.href())
                        hx-get=(next.href())
                        hx-target="#dashboard-content"
                        hx-swap="outerHTML"
                        hx-push-url="true"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Next"
                    }
                }
            }

            (statistics_panel(&month_name(&view_state.month), &data.statistics))

            (charts_view(&charts))
        }
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_htmx::HxRequest;
    use scraper::{Html, Selector};

    use crate::{
        pagination::PaginationConfig,
        query_params::LenientQuery,
        test_utils::{
            assert_valid_html, get_test_connection, parse_html_document, parse_html_fragment,
        },
        transaction::{Transaction, insert_transactions},
    };

    use super::{DashboardParams, DashboardState, get_dashboard_page, month_name};

    fn get_test_state(transactions: &[Transaction]) -> DashboardState {
        let conn = get_test_connection();
        insert_transactions(transactions, &conn).expect("Could not insert transactions");

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            pagination_config: PaginationConfig::default(),
        }
    }

    fn params(query: &str) -> LenientQuery<DashboardParams> {
        LenientQuery(serde_urlencoded::from_str(query).expect("Could not parse query string"))
    }

    fn march_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(150.0, "2022-03-15T10:00:00+05:30")
                .title("Desk Lamp")
                .category("electronics")
                .sold(true)
                .finalize(),
            Transaction::build(20.0, "2022-03-20T10:00:00+05:30")
                .title("Coffee Mug")
                .category("kitchen")
                .finalize(),
            Transaction::build(999.0, "2022-04-01T10:00:00+05:30")
                .title("Gold Ring")
                .category("jewelery")
                .sold(true)
                .finalize(),
        ]
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state(&march_transactions());

        let response = get_dashboard_page(State(state), HxRequest(false), params("")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_exists(&html, "#dashboard-filters");
        assert_exists(&html, "#dashboard-content");
        assert_exists(&html, "#transactions-table");
        assert_exists(&html, "#price-range-chart");
        assert_exists(&html, "#category-chart");
    }

    #[tokio::test]
    async fn defaults_to_march() {
        let state = get_test_state(&march_transactions());

        let response = get_dashboard_page(State(state), HxRequest(false), params("")).await;

        let html = parse_html_document(response).await;
        assert_eq!(transaction_rows(&html), 2);
        let selected = Selector::parse("#month option[selected]").unwrap();
        let selected_month = html
            .select(&selected)
            .next()
            .and_then(|option| option.value().attr("value"));
        assert_eq!(selected_month, Some("03"));
    }

    #[tokio::test]
    async fn htmx_request_gets_content_only() {
        let state = get_test_state(&march_transactions());

        let response =
            get_dashboard_page(State(state), HxRequest(true), params("month=04")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let fragment = String::from_utf8_lossy(&body).to_string();
        assert!(!fragment.contains("<html"), "{fragment}");
        assert!(!fragment.contains("dashboard-filters"), "{fragment}");
        let html = Html::parse_fragment(&fragment);
        assert_valid_html(&html);
        assert_exists(&html, "#dashboard-content");
        assert_eq!(transaction_rows(&html), 1);
    }

    #[tokio::test]
    async fn search_filters_table_but_not_statistics() {
        let state = get_test_state(&march_transactions());

        let response =
            get_dashboard_page(State(state), HxRequest(true), params("month=03&search=lamp"))
                .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(transaction_rows(&html), 1);
        let not_sold = Selector::parse("[data-not-sold-items]").unwrap();
        let not_sold_text = html
            .select(&not_sold)
            .next()
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default();
        assert_eq!(not_sold_text.trim(), "1");
    }

    #[tokio::test]
    async fn page_links_keep_month_and_search() {
        let state = get_test_state(&march_transactions());

        let response = get_dashboard_page(
            State(state),
            HxRequest(true),
            params("month=03&search=mug&page=2"),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(link_href(&html, "#previous-page"), "/dashboard?month=03&search=mug&page=1");
        assert_eq!(link_href(&html, "#next-page"), "/dashboard?month=03&search=mug&page=3");
    }

    #[tokio::test]
    async fn page_links_push_their_url_to_history() {
        let state = get_test_state(&march_transactions());

        let response =
            get_dashboard_page(State(state), HxRequest(true), params("month=03&page=2")).await;

        let html = parse_html_fragment(response).await;
        for selector in ["#previous-page", "#next-page"] {
            let link = html
                .select(&Selector::parse(selector).unwrap())
                .next()
                .unwrap_or_else(|| panic!("could not find {selector}"));
            assert_eq!(link.value().attr("hx-push-url"), Some("true"), "{selector}");
            assert_eq!(link.value().attr("hx-get"), link.value().attr("href"), "{selector}");
        }
    }

    #[tokio::test]
    async fn first_page_previous_link_stays_on_first_page() {
        let state = get_test_state(&[]);

        let response = get_dashboard_page(State(state), HxRequest(true), params("")).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(link_href(&html, "#previous-page"), "/dashboard?month=03&search=&page=1");
    }

    #[tokio::test]
    async fn poisoned_lock_renders_error_page() {
        let state = get_test_state(&[]);
        let connection = state.db_connection.clone();
        let _ = std::thread::spawn(move || {
            let _guard = connection.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let response = get_dashboard_page(State(state), HxRequest(false), params("")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn month_name_uses_calendar_names() {
        assert_eq!(month_name("03"), "March");
        assert_eq!(month_name("12"), "December");
        assert_eq!(month_name("13"), "13");
        assert_eq!(month_name("abc"), "abc");
    }

    #[track_caller]
    fn assert_exists(html: &Html, selector: &str) {
        let parsed = Selector::parse(selector).unwrap();
        assert!(
            html.select(&parsed).next().is_some(),
            "Element '{selector}' not found in {}",
            html.html()
        );
    }

    fn transaction_rows(html: &Html) -> usize {
        let selector = Selector::parse("tr[data-transaction-row]").unwrap();
        html.select(&selector).count()
    }

    fn link_href(html: &Html, selector: &str) -> String {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .unwrap_or_default()
            .to_owned()
    }
}
