//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transaction table, statistics and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";

/// The route to list transactions for a month.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route that seeds the database from the remote fixture.
pub const INITIALIZE_API: &str = "/api/transactions/initialize";
/// The route for the sale statistics of a month.
pub const STATISTICS_API: &str = "/api/transactions/statistics";
/// The route for the price range counts of a month.
pub const BAR_CHART_API: &str = "/api/transactions/barchart";
/// The route for the category counts of a month.
pub const PIE_CHART_API: &str = "/api/transactions/piechart";
/// The route that returns the list, statistics and chart data in one payload.
pub const COMBINED_API: &str = "/api/transactions/combined";
