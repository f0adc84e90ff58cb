use dioxus::prelude::*;

use canteen_common::sales::{DateRange, ProductSales, SalesReport};
use canteen_common::timestamp::parse_date;

use super::user_state::use_user_state;

#[component]
pub fn SalesDashboardView() -> Element {
    let user_state = use_user_state();
    let mut start = use_signal(String::new);
    let mut end = use_signal(String::new);

    let range = DateRange {
        start: parse_date(&start.read()),
        end: parse_date(&end.read()),
    };
    let report = SalesReport::compute(&user_state.read().orders, range, chrono::Utc::now());

    rsx! {
        div { class: "sales-dashboard",
            h2 { "Sales" }
            div { class: "date-range",
                label { "From"
                    input {
                        r#type: "date",
                        value: "{start}",
                        oninput: move |evt| start.set(evt.value()),
                    }
                }
                label { "To"
                    input {
                        r#type: "date",
                        value: "{end}",
                        oninput: move |evt| end.set(evt.value()),
                    }
                }
                button {
                    onclick: move |_| {
                        start.set(String::new());
                        end.set(String::new());
                    },
                    "All time"
                }
            }
            div { class: "board-stats",
                div { class: "stat",
                    span { class: "stat-value", "{report.total_revenue}" }
                    span { class: "stat-label", "Revenue" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{report.total_orders}" }
                    span { class: "stat-label", "Orders" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{report.total_items}" }
                    span { class: "stat-label", "Items sold" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{report.average_order}" }
                    span { class: "stat-label", "Average order" }
                }
            }
            div { class: "rankings",
                RankingTable { title: "Best sellers", rows: report.top_products.clone() }
                RankingTable { title: "Least sold", rows: report.least_products.clone() }
            }
        }
    }
}

#[component]
fn RankingTable(title: &'static str, rows: Vec<ProductSales>) -> Element {
    rsx! {
        div { class: "ranking",
            h3 { "{title}" }
            if rows.is_empty() {
                p { class: "empty-state", "No sales in this period." }
            } else {
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Product" }
                            th { "Category" }
                            th { "Qty" }
                            th { "Revenue" }
                        }
                    }
                    tbody {
                        for (i, row) in rows.iter().enumerate() {
                            tr { key: "{row.product_id}",
                                td { "{i + 1}" }
                                td { "{row.name}" }
                                td { "{row.category}" }
                                td { "{row.quantity}" }
                                td { "{row.revenue}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
