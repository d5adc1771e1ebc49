//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A one-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The page number, starting at one.
    pub number: u64,
    /// The maximum number of items on the page.
    pub size: u64,
}

impl Page {
    /// Create a page, clamping `number` to a minimum of one.
    pub fn new(number: u64, size: u64) -> Self {
        Self {
            number: number.max(1),
            size,
        }
    }

    /// Build a page from raw query string values.
    ///
    /// Missing or unparsable values fall back to the defaults in `config`.
    pub fn from_query(number: Option<&str>, size: Option<&str>, config: &PaginationConfig) -> Self {
        let number = parse_or(number, config.default_page);
        let size = parse_or(size, config.default_page_size);

        Self::new(number, size)
    }

    /// The number of items that come before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

fn parse_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use crate::pagination::{Page, PaginationConfig};

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page::new(1, 10).offset(), 0);
        assert_eq!(Page::new(2, 10).offset(), 10);
        assert_eq!(Page::new(3, 25).offset(), 50);
    }

    #[test]
    fn page_zero_is_clamped_to_first_page() {
        assert_eq!(Page::new(0, 10), Page::new(1, 10));
    }

    #[test]
    fn missing_values_use_defaults() {
        let config = PaginationConfig::default();

        let page = Page::from_query(None, None, &config);

        assert_eq!(page, Page::new(1, 10));
    }

    #[test]
    fn invalid_values_use_defaults() {
        let config = PaginationConfig::default();

        let page = Page::from_query(Some("abc"), Some("-5"), &config);

        assert_eq!(page, Page::new(1, 10));
    }

    #[test]
    fn parses_numbers() {
        let config = PaginationConfig::default();

        let page = Page::from_query(Some("4"), Some("5"), &config);

        assert_eq!(page, Page::new(4, 5));
    }
}
