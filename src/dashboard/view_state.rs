//! The month, search text and page that the dashboard is showing.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    endpoints,
    pagination::{Page, PaginationConfig},
    transaction::ListQuery,
};

/// The month shown when the request does not pick one.
pub(super) const DEFAULT_MONTH: &str = "03";

/// Query string for the dashboard page.
///
/// Values are kept as text so that a malformed page number falls back to the
/// first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    month: Option<String>,
    search: Option<String>,
    page: Option<String>,
}

/// An immutable snapshot of the dashboard's inputs.
///
/// Every interaction produces a new view state, which is encoded in the query
/// string of the single request that re-renders the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct ViewState {
    pub month: String,
    pub search: String,
    pub page: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            month: DEFAULT_MONTH.to_owned(),
            search: String::new(),
            page: 1,
        }
    }
}

impl ViewState {
    /// Build the view state for a request.
    ///
    /// A request without a page, e.g. after changing the month or search
    /// text, starts again from the first page.
    pub fn from_params(params: DashboardParams) -> Self {
        let page = Page::from_query(params.page.as_deref(), None, &PaginationConfig::default());

        Self {
            month: params.month.unwrap_or_else(|| DEFAULT_MONTH.to_owned()),
            search: params.search.unwrap_or_default(),
            page: page.number,
        }
    }

    /// The same view one page back, stopping at the first page.
    pub fn previous_page(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self.clone()
        }
    }

    /// The same view one page forward.
    ///
    /// There is no upper limit, the page after the last one is simply empty.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// The list query that fetches this view's transactions.
    pub fn list_query(&self, config: &PaginationConfig) -> ListQuery {
        ListQuery {
            month: Some(self.month.clone()),
            search: self.search.clone(),
            page: Page::new(self.page, config.default_page_size),
        }
    }

    /// The dashboard URL that renders this view.
    pub fn href(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("Could not encode dashboard query string: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }
}

/// The options for the month picker as (value, label) pairs, e.g. ("03", "March").
pub(super) fn month_options() -> impl Iterator<Item = (String, Month)> {
    std::iter::successors(Some(Month::January), |month| Some(month.next()))
        .take(12)
        .map(|month| (format!("{:02}", month as u8), month))
}
