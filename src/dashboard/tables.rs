//! Table views for dashboard data display.
//!
//! Provides the transaction table and the monthly statistics panel.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Statistics, Transaction},
};

const STAT_CARD_STYLE: &str = "flex-1 p-4 rounded-lg shadow bg-white dark:bg-gray-800";
const STAT_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const STAT_VALUE_STYLE: &str = "text-2xl font-bold";

/// Renders a page of transactions, one row per transaction.
///
/// An empty page shows a single row explaining that nothing matched.
pub(super) fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow mb-4" {
            table id="transactions-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date of Sale" }
                    }
                }
                tbody {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) data-transaction-row {
                            td class=(TABLE_CELL_STYLE) { (transaction.id) }
                            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                (transaction.title)
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                (format_currency(transaction.price))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) {
                                @if transaction.sold { "Yes" } @else { "No" }
                            }
                            td class=(TABLE_CELL_STYLE) {
                                @if let Some(image) = &transaction.image {
                                    img src=(image) alt=(transaction.title) class="w-12 h-12 object-contain";
                                }
                            }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                (sale_date(&transaction.date_of_sale))
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE) {
                            td colspan="8" class={(TABLE_CELL_STYLE) " text-center"} {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the total sale amount and the sold and unsold item counts for a month.
pub(super) fn statistics_panel(month_name: &str, statistics: &Statistics) -> Markup {
    html! {
        section id="statistics" class="w-full mb-4" {
            h3 class="text-xl font-semibold mb-4" { "Statistics - " (month_name) }

            div class="flex flex-col md:flex-row gap-4" {
                div class=(STAT_CARD_STYLE) {
                    p class=(STAT_LABEL_STYLE) { "Total sale" }
                    p class=(STAT_VALUE_STYLE) data-total-sale-amount {
                        (format_currency(statistics.total_sale_amount))
                    }
                }
                div class=(STAT_CARD_STYLE) {
                    p class=(STAT_LABEL_STYLE) { "Total sold items" }
                    p class=(STAT_VALUE_STYLE) data-sold-items { (statistics.sold_items) }
                }
                div class=(STAT_CARD_STYLE) {
                    p class=(STAT_LABEL_STYLE) { "Total not sold items" }
                    p class=(STAT_VALUE_STYLE) data-not-sold-items { (statistics.not_sold_items) }
                }
            }
        }
    }
}

/// The calendar date part of a stored sale timestamp, e.g. "2022-03-15".
fn sale_date(date_of_sale: &str) -> &str {
    date_of_sale.get(..10).unwrap_or(date_of_sale)
}
