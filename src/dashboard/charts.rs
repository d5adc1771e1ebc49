//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for a month of sales:
//! - **Price Range Chart**: Bar chart of how many items fall into each price range
//! - **Category Chart**: Pie chart of how many items were sold in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Color, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::transaction::{CategoryCount, PriceRangeCount};

/// The colours used for the category slices, assigned by slice position.
const CATEGORY_PALETTE: [&str; 8] = [
    "#2563eb", "#16a34a", "#f59e0b", "#dc2626", "#7c3aed", "#0891b2", "#db2777", "#65a30d",
];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart containers followed by the script that draws into them.
///
/// The script is placed next to the containers rather than in the page head
/// so that it runs again whenever htmx swaps in new dashboard content.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }
        }

        script { (charts_script(charts)) }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing. Charts are kept in `window.dashboardCharts` by
/// container ID; re-rendering a chart removes the listeners of the previous
/// instance and disposes it before drawing the new one.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{id}");
                    if (!chartDom || typeof echarts === 'undefined') return;

                    window.dashboardCharts = window.dashboardCharts || {{}};
                    const previous = window.dashboardCharts["{id}"];
                    if (previous) {{
                        window.removeEventListener('resize', previous.onResize);
                        previous.darkModeMediaQuery.removeEventListener('change', previous.updateTheme);
                        previous.chart.dispose();
                    }}
                    echarts.dispose(chartDom);

                    const chart = echarts.init(chartDom);
                    const option = {options};
                    chart.setOption(option);

                    const onResize = () => chart.resize();
                    window.addEventListener('resize', onResize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }};
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();

                    window.dashboardCharts["{id}"] = {{ chart, onResize, darkModeMediaQuery, updateTheme }};
                }})();"#,
                id = chart.id,
                options = chart.options,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

/// Bar chart with one bar per price range, in range order.
pub(super) fn price_range_chart(price_ranges: &[PriceRangeCount]) -> Chart {
    let labels: Vec<String> = price_ranges.iter().map(|bucket| bucket.range.clone()).collect();
    let values: Vec<f64> = price_ranges
        .iter()
        .map(|bucket| f64::from(bucket.count))
        .collect();

    Chart::new()
        .title(Title::new().text("Price Ranges").subtext("Items per price range"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Items").data(values))
}

/// Pie chart with one slice per category, in the order the categories are given.
pub(super) fn category_chart(categories: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (f64::from(category.count), category.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Categories").subtext("Items per category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("right").top("middle"))
        .color(
            category_colors(categories.len())
                .into_iter()
                .map(Color::from)
                .collect(),
        )
        .series(Pie::new().name("Items").radius("60%").data(data))
}

/// The colour for each of the first `count` slices.
///
/// Colours repeat once the palette runs out, so the same data always gets the
/// same colours.
fn category_colors(count: usize) -> Vec<&'static str> {
    CATEGORY_PALETTE.iter().copied().cycle().take(count).collect()
}

#[cfg(test)]
mod tests {
    use crate::transaction::{CategoryCount, PriceRangeCount};

    use super::{
        CATEGORY_PALETTE, DashboardChart, category_chart, category_colors, charts_script,
        charts_view, price_range_chart,
    };

    fn categories() -> Vec<CategoryCount> {
        vec![
            CategoryCount {
                category: "electronics".to_owned(),
                count: 3,
            },
            CategoryCount {
                category: "jewelery".to_owned(),
                count: 1,
            },
        ]
    }

    #[test]
    fn category_colors_are_deterministic() {
        let first = category_chart(&categories()).to_string();
        let second = category_chart(&categories()).to_string();

        assert_eq!(first, second);
        assert!(first.contains(CATEGORY_PALETTE[0]), "{first}");
        assert!(first.contains(CATEGORY_PALETTE[1]), "{first}");
    }

    #[test]
    fn category_colors_wrap_around_palette() {
        let colors = category_colors(CATEGORY_PALETTE.len() + 2);

        assert_eq!(colors.len(), CATEGORY_PALETTE.len() + 2);
        assert_eq!(colors[0], colors[CATEGORY_PALETTE.len()]);
    }

    #[test]
    fn category_chart_contains_categories() {
        let options = category_chart(&categories()).to_string();

        assert!(options.contains("electronics"), "{options}");
        assert!(options.contains("jewelery"), "{options}");
    }

    #[test]
    fn price_range_chart_contains_labels() {
        let buckets = vec![
            PriceRangeCount {
                range: "0 - 100".to_owned(),
                count: 2,
            },
            PriceRangeCount {
                range: "901 - above".to_owned(),
                count: 0,
            },
        ];

        let options = price_range_chart(&buckets).to_string();

        assert!(options.contains("0 - 100"), "{options}");
        assert!(options.contains("901 - above"), "{options}");
    }

    #[test]
    fn charts_view_renders_containers_and_script() {
        let charts = [DashboardChart {
            id: "test-chart",
            options: "{}".to_owned(),
        }];

        let html = charts_view(&charts).into_string();

        assert!(html.contains(r#"id="test-chart""#), "{html}");
        assert!(html.contains("echarts.init"), "{html}");
    }

    #[test]
    fn charts_script_releases_previous_chart_listeners() {
        let charts = [DashboardChart {
            id: "test-chart",
            options: "{}".to_owned(),
        }];

        let script = charts_script(&charts).into_string();

        let removes_resize = script
            .find("removeEventListener('resize', previous.onResize)")
            .expect("previous resize listener should be removed");
        let removes_theme = script
            .find("removeEventListener('change', previous.updateTheme)")
            .expect("previous theme listener should be removed");
        let adds_resize = script
            .find("addEventListener('resize', onResize)")
            .expect("resize listener should be added");
        assert!(removes_resize < adds_resize, "{script}");
        assert!(removes_theme < adds_resize, "{script}");
        assert!(
            script.contains(r#"window.dashboardCharts["test-chart"] = "#),
            "{script}"
        );
    }
}
