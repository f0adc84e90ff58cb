use dioxus::prelude::*;

use canteen_common::order::{
    board_actions, filter_orders, BoardStats, Order, OrderStatus, StatusFilter, StatusUpdate,
};
use canteen_common::phone::format_phone;

use super::api_actions::{use_api_action, ApiAction};
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn AdminOrdersView() -> Element {
    let user_state = use_user_state();
    let api = use_api_action();
    let mut filter = use_signal(StatusFilter::default);

    let state = user_state.read();
    let stats = BoardStats::compute(&state.orders);
    let visible: Vec<Order> = filter_orders(&state.orders, filter())
        .into_iter()
        .cloned()
        .collect();
    drop(state);

    let mut tabs = vec![(StatusFilter::All, "All".to_string())];
    tabs.extend(
        OrderStatus::all()
            .iter()
            .map(|s| (StatusFilter::Only(*s), s.label().to_string())),
    );

    rsx! {
        div { class: "admin-orders",
            div { class: "board-heading",
                h2 { "Orders" }
                button { onclick: move |_| api.send(ApiAction::RefreshOrders), "Refresh" }
            }
            div { class: "board-stats",
                for status in [OrderStatus::Pending, OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
                    div { class: "stat {status.css_class()}",
                        span { class: "stat-value", "{stats.count(status)}" }
                        span { class: "stat-label", "{status.label()}" }
                    }
                }
                div { class: "stat revenue",
                    span { class: "stat-value", "{stats.revenue}" }
                    span { class: "stat-label", "Revenue" }
                }
            }
            div { class: "category-tabs",
                for (tab, label) in tabs {
                    button {
                        class: if filter() == tab { "tab active" } else { "tab" },
                        onclick: move |_| filter.set(tab),
                        "{label}"
                    }
                }
            }
            if visible.is_empty() {
                p { class: "empty-state", "No orders here." }
            } else {
                div { class: "order-list",
                    for order in visible {
                        BoardCard { key: "{order.id}", order }
                    }
                }
            }
        }
    }
}

#[component]
fn BoardCard(order: Order) -> Element {
    let api = use_api_action();
    let mut shared_state = use_shared_state();
    let status = order.status;
    let created = order.created_label("%d/%m %H:%M");
    let phone = order.user_phone.as_deref().map(format_phone).unwrap_or_default();
    let code = order.pickup_code.clone().unwrap_or_default();

    rsx! {
        div { class: "order-card board-card",
            div { class: "order-header",
                span { class: "order-id", "#{order.id}" }
                span { class: "order-status {status.css_class()}", "{status.icon()} {status.label()}" }
            }
            p { class: "order-customer", "{order.user_name} {phone}" }
            p { class: "order-date", "{created}" }
            ul { class: "order-items",
                for item in order.items.iter() {
                    li { "{item.quantity}x {item.product.name}" }
                }
            }
            p { class: "order-total", "{order.total} - {order.payment_label()}" }
            if !code.is_empty() {
                p { class: "pickup-code", "Code: {code}" }
            }
            if let Some(reason) = order.cancel_reason.as_ref() {
                p { class: "cancel-reason", "Reason: {reason}" }
            }
            div { class: "board-actions",
                for action in board_actions(status).iter().copied() {
                    {
                        let order = order.clone();
                        rsx! {
                            button {
                                class: if action.target == OrderStatus::Cancelled { "danger" } else { "primary" },
                                onclick: move |_| {
                                    let reason = (action.target == OrderStatus::Cancelled)
                                        .then(|| "Cancelled by the canteen".to_string());
                                    match StatusUpdate::for_order(&order, action.target, reason) {
                                        Ok(update) => api.send(ApiAction::UpdateStatus {
                                            order_id: order.id.clone(),
                                            update,
                                        }),
                                        Err(e) => shared_state.write().last_error = Some(e.to_string()),
                                    }
                                },
                                "{action.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
