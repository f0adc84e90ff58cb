use dioxus::prelude::*;

use canteen_common::order::OrderStatus;
use canteen_common::phone::{format_phone, PICKUP_CODE_LEN};
use canteen_common::pickup::{complete_pickup, find_by_pickup_code, PickupLookup};

use super::api_actions::{use_api_action, ApiAction};
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

/// Counter handoff: look an order up by the code the student shows.
#[component]
pub fn PickupView() -> Element {
    let user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let api = use_api_action();
    let mut code = use_signal(String::new);
    let mut lookup = use_signal(|| PickupLookup::Empty);

    // Re-read the found order from the board so a completed handoff shows up.
    let found = match &*lookup.read() {
        PickupLookup::Found(order) => user_state
            .read()
            .orders
            .iter()
            .find(|o| o.id == order.id)
            .cloned()
            .or_else(|| Some(order.clone())),
        _ => None,
    };
    let not_found = *lookup.read() == PickupLookup::NotFound;

    let search = move |evt: FormEvent| {
        evt.prevent_default();
        let result = find_by_pickup_code(&user_state.read().orders, &code.read());
        lookup.set(result);
    };

    rsx! {
        div { class: "pickup-view",
            h2 { "Pickup" }
            form { class: "pickup-search", onsubmit: search,
                input {
                    r#type: "text",
                    inputmode: "numeric",
                    maxlength: "{PICKUP_CODE_LEN}",
                    placeholder: "Pickup code",
                    value: "{code}",
                    oninput: move |evt| code.set(evt.value()),
                }
                button { r#type: "submit", "Search" }
                button {
                    r#type: "button",
                    onclick: move |_| {
                        code.set(String::new());
                        lookup.set(PickupLookup::Empty);
                    },
                    "Clear"
                }
            }
            if not_found {
                p { class: "empty-state", "No ready order with this code." }
            }
            if let Some(order) = found {
                {
                    let phone = order.user_phone.as_deref().map(format_phone).unwrap_or_default();
                    let ready = order.status == OrderStatus::Ready;
                    let handoff = order.clone();
                    rsx! {
                        div { class: "order-card pickup-result",
                            div { class: "order-header",
                                span { class: "order-id", "Order #{order.id}" }
                                span { class: "order-status {order.status.css_class()}", "{order.status.label()}" }
                            }
                            p { class: "order-customer", "{order.user_name} {phone}" }
                            ul { class: "order-items",
                                for item in order.items.iter() {
                                    li { "{item.quantity}x {item.product.name}" }
                                }
                            }
                            p { class: "order-total", "{order.total} - {order.payment_label()}" }
                            if ready {
                                button {
                                    class: "primary",
                                    onclick: move |_| match complete_pickup(&handoff) {
                                        Ok(update) => api.send(ApiAction::UpdateStatus {
                                            order_id: handoff.id.clone(),
                                            update,
                                        }),
                                        Err(e) => shared_state.write().last_error = Some(e.to_string()),
                                    },
                                    "Hand over"
                                }
                            } else {
                                p { class: "delivered-note", "Already delivered." }
                            }
                        }
                    }
                }
            }
        }
    }
}
