//! The fixed price buckets used by the bar chart.

/// A price bucket. `max` of `None` means the bucket has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// The lowest whole price in the bucket.
    pub min: u32,
    /// The highest price in the bucket, inclusive.
    pub max: Option<u32>,
}

/// Ascending, contiguous price buckets: 0 - 100, 101 - 200, ..., 901 - above.
pub const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange::bounded(0, 100),
    PriceRange::bounded(101, 200),
    PriceRange::bounded(201, 300),
    PriceRange::bounded(301, 400),
    PriceRange::bounded(401, 500),
    PriceRange::bounded(501, 600),
    PriceRange::bounded(601, 700),
    PriceRange::bounded(701, 800),
    PriceRange::bounded(801, 900),
    PriceRange { min: 901, max: None },
];

impl PriceRange {
    const fn bounded(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// The label shown on the chart axis, e.g. "101 - 200" or "901 - above".
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{} - {}", self.min, max),
            None => format!("{} - above", self.min),
        }
    }

    /// Whether `price` falls in this bucket.
    ///
    /// The lower edge is exclusive of the previous bucket's maximum rather than
    /// inclusive of `min`, so a price such as 100.5 lands in "101 - 200"
    /// instead of falling between buckets. The lowest bucket also takes
    /// anything below zero.
    pub fn contains(&self, price: f64) -> bool {
        let above_lower = self.min == 0 || price > f64::from(self.min - 1);
        let below_upper = self.max.is_none_or(|max| price <= f64::from(max));

        above_lower && below_upper
    }
}

/// Get the index into [PRICE_RANGES] of the bucket that holds `price`.
pub fn price_range_index(price: f64) -> usize {
    PRICE_RANGES
        .iter()
        .position(|range| range.contains(price))
        // Only NaN fails every bucket.
        .unwrap_or(0)
}
