//! Application router configuration for the dashboard page and the JSON API.

use axum::{Router, response::Redirect, routing::get};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        bar_chart_endpoint, combined_endpoint, initialize_endpoint, list_transactions_endpoint,
        pie_chart_endpoint, statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page));

    let api_routes = Router::new()
        .route(endpoints::TRANSACTIONS_API, get(list_transactions_endpoint))
        .route(endpoints::INITIALIZE_API, get(initialize_endpoint))
        .route(endpoints::STATISTICS_API, get(statistics_endpoint))
        .route(endpoints::BAR_CHART_API, get(bar_chart_endpoint))
        .route(endpoints::PIE_CHART_API, get(pie_chart_endpoint))
        .route(endpoints::COMBINED_API, get(combined_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
