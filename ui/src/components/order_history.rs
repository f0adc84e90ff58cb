use dioxus::prelude::*;

use canteen_common::order::{CancelRequest, Order, OrderId, OrderStatus};

use super::api_client::ApiClient;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn OrderHistoryView() -> Element {
    let user_state = use_user_state();
    let orders = user_state.read().orders.clone();
    // Order whose cancellation form is open.
    let cancelling = use_signal(|| None::<OrderId>);

    rsx! {
        div { class: "my-orders",
            h2 { "My Orders" }
            if orders.is_empty() {
                p { class: "empty-state", "You haven't placed any orders yet. Head to the menu to get started!" }
            } else {
                div { class: "order-list",
                    for order in orders {
                        OrderCard { key: "{order.id}", order, cancelling }
                    }
                }
            }
        }
    }
}

#[component]
fn OrderCard(order: Order, mut cancelling: Signal<Option<OrderId>>) -> Element {
    let created = order.created_label("%d/%m/%Y %H:%M");
    let total = order.total.to_string();
    let payment = order.payment_label().to_string();
    let status = order.status;
    let timeline = order.timeline();
    let is_cancelling = cancelling.read().as_ref() == Some(&order.id);
    let open_id = order.id.clone();

    rsx! {
        div { class: "order-card",
            div { class: "order-header",
                span { class: "order-id", "Order #{order.id}" }
                span { class: "order-status {status.css_class()}", "{status.icon()} {status.label()}" }
            }
            p { class: "order-date", "{created}" }
            ul { class: "order-items",
                for item in order.items.iter() {
                    li { "{item.quantity}x {item.product.name} - {item.subtotal()}" }
                }
            }
            p { class: "order-total", "Total: {total}" }
            p { class: "order-payment", "Payment: {payment}" }
            if let Some(code) = order.pickup_code.as_ref() {
                if status != OrderStatus::Cancelled {
                    p { class: "pickup-code", "Pickup code: " strong { "{code}" } }
                }
            }
            if let Some(steps) = timeline {
                div { class: "order-timeline",
                    for step in steps {
                        div { class: if step.active { "timeline-step active" } else { "timeline-step" },
                            span { class: "timeline-dot" }
                            span { "{step.label}" }
                        }
                    }
                }
            }
            if let Some(reason) = order.cancel_reason.as_ref() {
                p { class: "cancel-reason", "Cancellation reason: {reason}" }
            }
            if order.can_cancel() {
                if is_cancelling {
                    CancelForm { order: order.clone(), cancelling }
                } else {
                    button {
                        class: "cancel-btn",
                        onclick: move |_| cancelling.set(Some(open_id.clone())),
                        "Cancel order"
                    }
                }
            }
        }
    }
}

/// Reason prompt shown under a pending order.
#[component]
fn CancelForm(order: Order, mut cancelling: Signal<Option<OrderId>>) -> Element {
    let mut user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let mut reason = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let confirm = move |_| {
        let request = match CancelRequest::for_order(&order, &reason.read()) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let order_id = order.id.clone();
        let client = ApiClient::new(shared_state.read().config.clone());
        submitting.set(true);
        spawn(async move {
            match client.cancel_order(&order_id, &request).await {
                Ok(reply) => {
                    tracing::info!("Cancelled order #{order_id}");
                    let mut state = user_state.write();
                    state.apply_status(&order_id, OrderStatus::Cancelled, Some(request.reason));
                    if let Some(balance) = reply.updated_balance {
                        state.set_balance(balance);
                    }
                    drop(state);
                    shared_state.write().notice = Some(format!("Order #{order_id} cancelled"));
                    cancelling.set(None);
                }
                Err(e) => {
                    tracing::error!("Cancelling order #{order_id} failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "cancel-form",
            label { "Why are you cancelling?" }
            textarea {
                value: "{reason}",
                oninput: move |evt| reason.set(evt.value()),
            }
            if let Some(err) = error.read().as_ref() {
                p { class: "field-error", "{err}" }
            }
            div { class: "cancel-actions",
                button {
                    disabled: submitting() || reason.read().trim().is_empty(),
                    onclick: confirm,
                    "Confirm cancellation"
                }
                button {
                    onclick: move |_| cancelling.set(None),
                    "Keep order"
                }
            }
        }
    }
}
